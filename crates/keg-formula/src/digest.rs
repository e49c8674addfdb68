//! Archive integrity verification.
//!
//! Computes MD5 / SHA-256 digests as lowercase hex and compares them
//! bit-exact against the digest stored in the formula. Stored digests
//! are already lowercase-normalized at load time, so comparison is a
//! plain string equality.

use md5::Md5;
use sha2::{Digest, Sha256};

use crate::types::{Checksum, Formula};

/// Computed digest disagrees with the digest stored in the formula.
///
/// Fatal for the install attempt; the build steps must not run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{algorithm} checksum mismatch: expected {expected}, got {actual}")]
pub struct ChecksumMismatch {
    /// Algorithm name ("md5" or "sha256").
    pub algorithm: &'static str,

    /// The digest stored in the formula.
    pub expected: String,

    /// The digest computed over the fetched bytes.
    pub actual: String,
}

impl Checksum {
    /// Compute this checksum's algorithm over `bytes`, as lowercase hex.
    pub fn compute(&self, bytes: &[u8]) -> String {
        match self {
            Checksum::Md5(_) => format!("{:x}", Md5::digest(bytes)),
            Checksum::Sha256(_) => format!("{:x}", Sha256::digest(bytes)),
        }
    }

    /// Verify `bytes` against the stored digest.
    pub fn verify(&self, bytes: &[u8]) -> Result<(), ChecksumMismatch> {
        let actual = self.compute(bytes);
        if actual != self.digest() {
            return Err(ChecksumMismatch {
                algorithm: self.algorithm(),
                expected: self.digest().to_string(),
                actual,
            });
        }
        Ok(())
    }
}

impl Formula {
    /// Verify fetched archive bytes against this formula's checksum.
    pub fn verify(&self, bytes: &[u8]) -> Result<(), ChecksumMismatch> {
        self.checksum.verify(bytes)
    }
}
