//! Formula data model -- the static record an installer consumes.
//!
//! A formula names one installable package version: where to fetch the
//! source archive, the digest to verify it against, and the extra flags
//! for the configure step.

use serde::{Deserialize, Serialize};

/// Hex length of an MD5 digest.
const MD5_HEX_LEN: usize = 32;

/// Hex length of a SHA-256 digest.
const SHA256_HEX_LEN: usize = 64;

/// Archive suffixes the install pipeline knows how to unpack.
pub const ARCHIVE_SUFFIXES: &[&str] = &[".tar.gz", ".tgz", ".tar.bz2"];

/// Declared integrity checksum for a source archive.
///
/// Exactly one algorithm is present per formula. Digests are stored as
/// lowercase hex; comparison in [`Checksum::verify`] is bit-exact.
///
/// [`Checksum::verify`]: crate::digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checksum {
    /// MD5 digest (32 hex chars). Present only in older formula revisions.
    Md5(String),

    /// SHA-256 digest (64 hex chars).
    Sha256(String),
}

impl Checksum {
    /// Algorithm name as it appears in formula files.
    pub fn algorithm(&self) -> &'static str {
        match self {
            Checksum::Md5(_) => "md5",
            Checksum::Sha256(_) => "sha256",
        }
    }

    /// The stored lowercase-hex digest.
    pub fn digest(&self) -> &str {
        match self {
            Checksum::Md5(d) => d,
            Checksum::Sha256(d) => d,
        }
    }
}

/// One installable package version.
///
/// Loaded from `.toml` / `.json` formula files, immutable once loaded.
/// The install-time contract is three operations: [`source_url`],
/// [`verify`], and [`build_commands`].
///
/// [`source_url`]: Formula::source_url
/// [`verify`]: Formula::verify
/// [`build_commands`]: Formula::build_commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFormula", into = "RawFormula")]
pub struct Formula {
    /// Package identifier (e.g. "hdf5").
    pub name: String,

    /// Version identifier (e.g. "1.8.19"). Registry key together with `name`.
    pub version: String,

    /// Informational homepage URL. No behavioral effect.
    pub homepage: String,

    /// Source archive location.
    pub url: String,

    /// Integrity checksum for the fetched archive.
    pub checksum: Checksum,

    /// Extra flags appended to the configure step, in declared order.
    pub configure_args: Vec<String>,

    /// Where this formula was loaded from (set by the parser).
    pub source: String,
}

impl Formula {
    /// The source archive location, unchanged.
    pub fn source_url(&self) -> &str {
        &self.url
    }

    /// Display name in `name@version` form.
    pub fn id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// On-disk layout of a formula file.
///
/// The checksum appears as a plain `md5 = "..."` or `sha256 = "..."` key;
/// validation into [`Formula`] enforces that exactly one is present.
/// Unknown keys are ignored, so an unrecognized algorithm key surfaces as
/// a missing-checksum [`FormulaError::Malformed`], never as a mismatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFormula {
    #[serde(default)]
    name: String,

    #[serde(default)]
    version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    homepage: String,

    #[serde(default)]
    url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    md5: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    sha256: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    configure_args: Vec<String>,
}

impl TryFrom<RawFormula> for Formula {
    type Error = FormulaError;

    fn try_from(raw: RawFormula) -> Result<Self, FormulaError> {
        if raw.name.is_empty() {
            return Err(FormulaError::Malformed("missing field 'name'".into()));
        }
        if raw.version.is_empty() {
            return Err(FormulaError::Malformed(format!(
                "formula '{}': missing field 'version'",
                raw.name
            )));
        }
        if raw.url.is_empty() {
            return Err(FormulaError::Malformed(format!(
                "formula '{}': missing field 'url'",
                raw.name
            )));
        }
        if !ARCHIVE_SUFFIXES.iter().any(|s| raw.url.ends_with(s)) {
            return Err(FormulaError::Malformed(format!(
                "formula '{}': url '{}' is not a recognized archive ({})",
                raw.name,
                raw.url,
                ARCHIVE_SUFFIXES.join(", ")
            )));
        }

        let checksum = match (raw.md5, raw.sha256) {
            (Some(d), None) => Checksum::Md5(validate_digest(&raw.name, "md5", &d, MD5_HEX_LEN)?),
            (None, Some(d)) => {
                Checksum::Sha256(validate_digest(&raw.name, "sha256", &d, SHA256_HEX_LEN)?)
            }
            (None, None) => {
                return Err(FormulaError::Malformed(format!(
                    "formula '{}': no recognized checksum (expected 'md5' or 'sha256')",
                    raw.name
                )));
            }
            (Some(_), Some(_)) => {
                return Err(FormulaError::Malformed(format!(
                    "formula '{}': more than one checksum declared",
                    raw.name
                )));
            }
        };

        Ok(Formula {
            name: raw.name,
            version: raw.version,
            homepage: raw.homepage,
            url: raw.url,
            checksum,
            configure_args: raw.configure_args,
            source: String::new(),
        })
    }
}

impl From<Formula> for RawFormula {
    fn from(f: Formula) -> Self {
        let (md5, sha256) = match &f.checksum {
            Checksum::Md5(d) => (Some(d.clone()), None),
            Checksum::Sha256(d) => (None, Some(d.clone())),
        };
        RawFormula {
            name: f.name,
            version: f.version,
            homepage: f.homepage,
            url: f.url,
            md5,
            sha256,
            configure_args: f.configure_args,
        }
    }
}

/// Check digest length and hex alphabet, normalizing to lowercase.
fn validate_digest(
    name: &str,
    algorithm: &str,
    digest: &str,
    expected_len: usize,
) -> Result<String, FormulaError> {
    if digest.len() != expected_len {
        return Err(FormulaError::Malformed(format!(
            "formula '{}': {} digest must be {} hex chars, got {}",
            name,
            algorithm,
            expected_len,
            digest.len()
        )));
    }
    if !digest.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(FormulaError::Malformed(format!(
            "formula '{}': {} digest contains non-hex characters",
            name, algorithm
        )));
    }
    Ok(digest.to_ascii_lowercase())
}

/// Errors that can occur while loading and resolving formulas.
#[derive(Debug, thiserror::Error)]
pub enum FormulaError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("malformed formula: {0}")]
    Malformed(String),

    #[error("duplicate formula {name}@{version}")]
    DuplicateVersion { name: String, version: String },

    #[error("unknown formula: {0}")]
    UnknownFormula(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
