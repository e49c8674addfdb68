//! The process execution capability consumed by the install pipeline.

use std::io;
use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Runs one process to completion and reports its exit code.
///
/// A non-zero exit code is data, not an `Err`; the pipeline decides that
/// it aborts the install. `Err` is reserved for spawn failures (program
/// not found, permission denied).
pub trait Executor {
    fn run(&mut self, program: &str, args: &[String], cwd: &Path) -> io::Result<i32>;
}

/// The bundled executor: spawns via [`std::process::Command`], inheriting
/// stdout/stderr so build output reaches the terminal.
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn run(&mut self, program: &str, args: &[String], cwd: &Path) -> io::Result<i32> {
        debug!(program, ?args, cwd = %cwd.display(), "running build step");
        let status = Command::new(program).args(args).current_dir(cwd).status()?;
        // Killed-by-signal has no code; report it as a generic failure.
        Ok(status.code().unwrap_or(-1))
    }
}
