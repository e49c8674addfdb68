//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds everything a command handler needs:
//! the discovered `.keg/` directory, the loaded config, and the
//! effective formulas/cellar/cache locations after flag overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use keg_config::config::{load_config, KegConfig};
use keg_config::keg_dir::find_keg_dir;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Discovered or explicitly given `.keg/` directory, if any.
    pub keg_dir: Option<PathBuf>,

    /// Loaded `.keg/config.yaml` (default when absent).
    pub config: KegConfig,

    /// `--formulas` override.
    formulas_override: Option<PathBuf>,

    /// `--cellar` override.
    cellar_override: Option<PathBuf>,

    /// `--cache` override.
    cache_override: Option<PathBuf>,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// The keg directory is resolved as `--keg-dir` flag > `KEG_DIR` env >
    /// walking up from the current directory. Config load failures are
    /// real errors; a missing config file is not.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let keg_dir = global
            .keg_dir
            .clone()
            .or_else(|| find_keg_dir(Path::new(".")));

        let config = match keg_dir.as_deref() {
            Some(dir) => {
                tracing::debug!(keg_dir = %dir.display(), "resolved keg directory");
                load_config(dir)
                    .with_context(|| format!("loading config from {}", dir.display()))?
            }
            None => KegConfig::default(),
        };

        Ok(Self {
            keg_dir,
            config,
            formulas_override: global.formulas.clone(),
            cellar_override: global.cellar.clone(),
            cache_override: global.cache.clone(),
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        })
    }

    /// Effective formulas directory, or an error with a hint.
    pub fn formulas_dir(&self) -> Result<PathBuf> {
        self.formulas_override
            .clone()
            .or_else(|| {
                self.keg_dir
                    .as_deref()
                    .map(|dir| self.config.formulas_dir(dir))
            })
            .context("no formulas directory found. Run 'keg init' or pass --formulas.")
    }

    /// Effective cellar directory, or an error with a hint.
    pub fn cellar_dir(&self) -> Result<PathBuf> {
        self.cellar_override
            .clone()
            .or_else(|| {
                self.keg_dir
                    .as_deref()
                    .map(|dir| self.config.cellar_dir(dir))
            })
            .context("no cellar directory found. Run 'keg init' or pass --cellar.")
    }

    /// Effective cache directory, or an error with a hint.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        self.cache_override
            .clone()
            .or_else(|| {
                self.keg_dir
                    .as_deref()
                    .map(|dir| self.config.cache_dir(dir))
            })
            .context("no cache directory found. Run 'keg init' or pass --cache.")
    }
}
