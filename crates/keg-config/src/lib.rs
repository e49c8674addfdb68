//! Configuration management for the keg installer.
//!
//! This crate handles loading and saving `.keg/config.yaml` files,
//! discovering `.keg/` directories in the filesystem, and providing
//! typed access to the formulas, cellar, and cache locations.

pub mod config;
pub mod keg_dir;
