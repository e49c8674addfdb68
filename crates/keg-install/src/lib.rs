//! Fetch-verify-build pipeline for the keg installer.
//!
//! Wires the formula record's three operations into one straight-line
//! install routine: fetch the archive, verify its checksum, unpack it,
//! then run `./configure --prefix=...` and `make install`. The first
//! failing step aborts the attempt; there is no retry policy and no
//! parallelism here.

pub mod executor;
pub mod pipeline;
