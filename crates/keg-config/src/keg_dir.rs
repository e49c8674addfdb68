//! Discovery and management of the `.keg/` directory.
//!
//! The `.keg/` directory is the root of a keg installation's metadata:
//! its config file and, by default, its formulas, cellar, and cache.
//! This module finds it by walking up the directory tree, and creates it
//! when initializing a fresh setup.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// The name of the keg metadata directory.
const KEG_DIR_NAME: &str = ".keg";

/// The name of the environment variable that can override the keg directory.
const KEG_DIR_ENV: &str = "KEG_DIR";

/// Walk up the directory tree from `start` looking for a `.keg/` directory.
///
/// Returns the path to the `.keg/` directory if found, or `None` if the
/// filesystem root is reached without finding one. The `KEG_DIR`
/// environment variable is checked first (highest priority).
pub fn find_keg_dir(start: &Path) -> Option<PathBuf> {
    // 1. Check KEG_DIR environment variable (highest priority).
    if let Ok(env_dir) = std::env::var(KEG_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    // 2. Walk up from `start` looking for .keg/.
    let start = match start.canonicalize() {
        Ok(p) => p,
        Err(_) => return None,
    };

    let mut current = start.as_path();
    loop {
        let candidate = current.join(KEG_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
            }
            _ => break, // Reached filesystem root.
        }
    }

    None
}

/// Like [`find_keg_dir`], but converts `None` into
/// [`ConfigError::KegDirNotFound`].
pub fn find_keg_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_keg_dir(start).ok_or(ConfigError::KegDirNotFound)
}

/// Ensure a `.keg/` directory exists at the given path.
///
/// If `path` itself is not called `.keg`, the function creates a `.keg/`
/// subdirectory under it. The directory (and any necessary parents) is
/// created if it does not exist.
///
/// Returns the path to the `.keg/` directory.
pub fn ensure_keg_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let keg_dir = if path.ends_with(KEG_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(KEG_DIR_NAME)
    };

    std::fs::create_dir_all(&keg_dir)?;
    Ok(keg_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
