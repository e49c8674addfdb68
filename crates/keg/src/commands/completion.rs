//! `keg completion` -- generate shell completions.
//!
//! Uses `clap_complete` to generate shell completion scripts.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionArgs};
use crate::context::RuntimeContext;

/// Execute the `keg completion` command.
pub fn run(_ctx: &RuntimeContext, args: &CompletionArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "keg", &mut std::io::stdout());
    Ok(())
}
