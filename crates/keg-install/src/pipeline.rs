//! The install pipeline: fetch, verify, unpack, configure, make install.
//!
//! A straight line with no branching: every failure aborts the remaining
//! steps and surfaces to the caller. Verification always happens before
//! any process is spawned, and `make install` never runs when configure
//! exits non-zero.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use keg_fetch::fetcher::{FetchError, Fetcher};
use keg_formula::digest::ChecksumMismatch;
use keg_formula::types::Formula;

use crate::executor::Executor;

/// An install attempt failed. Terminal for that attempt; nothing is
/// recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Checksum(#[from] ChecksumMismatch),

    #[error("unpack failed: {0}")]
    Unpack(String),

    #[error("build step '{command}' exited with status {status}")]
    BuildStep { command: String, status: i32 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Where an install puts things.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Install prefix handed to configure (e.g. `<cellar>/hdf5/1.8.19`).
    pub prefix: PathBuf,

    /// Scratch directory the archive is written to and unpacked under.
    /// The caller owns its lifetime.
    pub workdir: PathBuf,
}

/// Run the full pipeline for one formula.
///
/// Fetches the archive, verifies it against the formula's checksum,
/// unpacks it in `workdir`, then runs the formula's two build commands
/// inside the unpacked source root.
pub fn install(
    formula: &Formula,
    fetcher: &dyn Fetcher,
    executor: &mut dyn Executor,
    opts: &InstallOptions,
) -> Result<(), InstallError> {
    let bytes = fetcher.fetch(formula.source_url())?;
    info!(formula = %formula.id(), size = bytes.len(), "fetched source archive");

    // Integrity gate: nothing is unpacked or executed on a mismatch.
    formula.verify(&bytes)?;
    info!(algorithm = formula.checksum.algorithm(), "checksum verified");

    let source_root = unpack(formula, &bytes, executor, &opts.workdir)?;

    for command in formula.build_commands(&opts.prefix) {
        let status = executor.run(&command.program, &command.args, &source_root)?;
        if status != 0 {
            return Err(InstallError::BuildStep {
                command: command.display(),
                status,
            });
        }
        info!(step = %command.display(), "build step finished");
    }

    info!(formula = %formula.id(), prefix = %opts.prefix.display(), "installed");
    Ok(())
}

/// Write the archive into `workdir` and unpack it there, returning the
/// unpacked source root.
///
/// Archives are expected to unpack into a single top-level directory
/// (`name-version/`), the conventional layout of configure/make tarballs.
fn unpack(
    formula: &Formula,
    bytes: &[u8],
    executor: &mut dyn Executor,
    workdir: &Path,
) -> Result<PathBuf, InstallError> {
    fs::create_dir_all(workdir)?;
    let archive = workdir.join(archive_file_name(formula.source_url()));
    fs::write(&archive, bytes)?;

    // tar detects gzip vs bzip2 on its own with -xf.
    let args = vec![
        "-xf".to_string(),
        archive.display().to_string(),
        "-C".to_string(),
        workdir.display().to_string(),
    ];
    let status = executor.run("tar", &args, workdir)?;
    if status != 0 {
        return Err(InstallError::Unpack(format!(
            "tar exited with status {} for {}",
            status,
            archive.display()
        )));
    }

    let mut dirs: Vec<PathBuf> = fs::read_dir(workdir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();

    match (dirs.pop(), dirs.is_empty()) {
        (Some(root), true) => Ok(root),
        (None, _) => Err(InstallError::Unpack(format!(
            "{} unpacked to no top-level directory",
            archive.display()
        ))),
        (Some(_), false) => Err(InstallError::Unpack(format!(
            "{} unpacked to more than one top-level directory",
            archive.display()
        ))),
    }
}

/// Last path segment of a source URL, used as the on-disk archive name.
fn archive_file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
