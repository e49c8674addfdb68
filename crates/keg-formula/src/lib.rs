//! Formula records for the keg installer.
//!
//! A formula is a declarative recipe for one package version: where to
//! fetch its source archive, the digest to verify the archive against,
//! and the fixed two-step configure/make pipeline that builds it.
//! Records are authored once as TOML or JSON, loaded into a
//! [`registry::FormulaRegistry`] at install time, and never mutated.

pub mod build;
pub mod digest;
pub mod parser;
pub mod registry;
pub mod types;
