//! `keg` -- formula-based source installer CLI.
//!
//! This is the entry point for the keg tool. It parses CLI arguments
//! with clap, resolves the runtime context, and dispatches to command
//! handlers.

mod cli;
mod commands;
mod context;
mod output;

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

fn main() {
    // Install signal handlers for graceful shutdown.
    // First Ctrl+C: exit cleanly. Second: force exit.
    let _ = ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            // Second signal: force exit
            std::process::exit(1);
        }
        // First signal: exit cleanly
        std::process::exit(0);
    });

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging based on verbosity
    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("keg=debug,keg_formula=debug,keg_fetch=debug,keg_install=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    // Handle errors: print message and exit with code 1
    if let Err(e) = run(&cli) {
        // For JSON mode, output error as JSON
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

/// Resolve the runtime context and dispatch to the command handler.
fn run(cli: &Cli) -> Result<()> {
    let ctx = RuntimeContext::from_global_args(&cli.global)?;

    match &cli.command {
        Some(Commands::Init(args)) => commands::init::run(&ctx, args),
        Some(Commands::List(args)) => commands::list::run(&ctx, args),
        Some(Commands::Info(args)) => commands::info::run(&ctx, args),
        Some(Commands::Fetch(args)) => commands::fetch::run(&ctx, args),
        Some(Commands::Verify(args)) => commands::verify::run(&ctx, args),
        Some(Commands::Install(args)) => commands::install::run(&ctx, args),
        Some(Commands::Audit(args)) => commands::audit::run(&ctx, args),
        Some(Commands::Completion(args)) => commands::completion::run(&ctx, args),
        Some(Commands::Version) => commands::version::run(&ctx),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    }
}
