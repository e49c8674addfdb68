//! Configuration types and loading for the keg installer.
//!
//! The main entry point is [`KegConfig`], which represents the contents of
//! `.keg/config.yaml`. Configuration is loaded with [`load_config`] and
//! saved with [`save_config`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file contained invalid YAML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// The `.keg/` directory was not found.
    #[error("no .keg directory found (run 'keg init' first)")]
    KegDirNotFound,
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Contents of `.keg/config.yaml`.
///
/// Every path is optional in the file; [`KegConfig::formulas_dir`] and
/// friends resolve the effective locations relative to the `.keg/`
/// directory when a field is absent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KegConfig {
    /// Directory holding formula files. Default: `<keg_dir>/formulas`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formulas: Option<PathBuf>,

    /// Install root; each package lands under `<cellar>/<name>/<version>`.
    /// Default: `<keg_dir>/cellar`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cellar: Option<PathBuf>,

    /// Scratch space for fetched archives and unpacked sources.
    /// Default: `<keg_dir>/cache`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<PathBuf>,
}

impl KegConfig {
    /// Effective formulas directory.
    pub fn formulas_dir(&self, keg_dir: &Path) -> PathBuf {
        self.formulas
            .clone()
            .unwrap_or_else(|| keg_dir.join("formulas"))
    }

    /// Effective cellar directory.
    pub fn cellar_dir(&self, keg_dir: &Path) -> PathBuf {
        self.cellar.clone().unwrap_or_else(|| keg_dir.join("cellar"))
    }

    /// Effective cache directory.
    pub fn cache_dir(&self, keg_dir: &Path) -> PathBuf {
        self.cache.clone().unwrap_or_else(|| keg_dir.join("cache"))
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load configuration from `config.yaml` inside the given `.keg/` directory.
///
/// If the file does not exist, a default [`KegConfig`] is returned.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
/// or [`ConfigError::ParseError`] if it contains invalid YAML.
pub fn load_config(keg_dir: &Path) -> Result<KegConfig> {
    let config_path = keg_dir.join("config.yaml");

    if !config_path.exists() {
        return Ok(KegConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)?;

    // An empty file is valid and yields default config.
    if content.trim().is_empty() {
        return Ok(KegConfig::default());
    }

    let config: KegConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to `config.yaml` inside the given `.keg/` directory.
///
/// The directory is created if it does not exist.
pub fn save_config(keg_dir: &Path, config: &KegConfig) -> Result<()> {
    std::fs::create_dir_all(keg_dir)?;

    let config_path = keg_dir.join("config.yaml");
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(config_path, yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
