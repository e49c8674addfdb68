//! The fixed two-step build pipeline a formula describes.

use std::path::Path;

use serde::Serialize;

use crate::types::Formula;

/// One process invocation in the build pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildCommand {
    /// Program to run, relative to the unpacked source root.
    pub program: String,

    /// Arguments, in order.
    pub args: Vec<String>,
}

impl BuildCommand {
    /// Render as a single shell-style line for display.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl Formula {
    /// The build invocations for this formula, in execution order.
    ///
    /// Always exactly two entries: `./configure --prefix=<prefix>` with the
    /// formula's extra flags appended in declared order, then
    /// `make install`. No branching, no retries, no alternate paths.
    pub fn build_commands(&self, prefix: &Path) -> Vec<BuildCommand> {
        let mut configure_args = Vec::with_capacity(1 + self.configure_args.len());
        configure_args.push(format!("--prefix={}", prefix.display()));
        configure_args.extend(self.configure_args.iter().cloned());

        vec![
            BuildCommand {
                program: "./configure".to_string(),
                args: configure_args,
            },
            BuildCommand {
                program: "make".to_string(),
                args: vec!["install".to_string()],
            },
        ]
    }
}
