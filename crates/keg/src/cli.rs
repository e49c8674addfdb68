//! Clap CLI definitions for the `keg` command.
//!
//! This module defines the complete CLI structure using clap 4 derive
//! macros. Every subcommand maps onto one of the formula operations or
//! a thin maintenance routine around them.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// keg -- formula-based source installer.
///
/// Fetches a package's source archive, verifies it against the digest
/// declared in its formula, and builds it with the conventional
/// configure/make two-step.
#[derive(Parser, Debug)]
#[command(
    name = "keg",
    about = "Formula-based source installer",
    long_about = "Fetches a package's source archive, verifies it against the digest declared in its formula, and builds it with the conventional configure/make two-step.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Keg directory (default: auto-discover .keg/ upward from cwd).
    #[arg(long, global = true)]
    pub keg_dir: Option<PathBuf>,

    /// Formulas directory (overrides config).
    #[arg(long, global = true, env = "KEG_FORMULAS")]
    pub formulas: Option<PathBuf>,

    /// Cellar directory; packages install under <cellar>/<name>/<version>.
    #[arg(long, global = true, env = "KEG_CELLAR")]
    pub cellar: Option<PathBuf>,

    /// Cache directory for fetched archives and build scratch space.
    #[arg(long, global = true, env = "KEG_CACHE")]
    pub cache: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a .keg directory with a default config.
    Init(InitArgs),

    /// List known formulas.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one formula in detail.
    #[command(alias = "show")]
    Info(InfoArgs),

    /// Fetch and verify a formula's source archive without building.
    Fetch(FetchArgs),

    /// Verify a local archive against a formula's checksum.
    Verify(VerifyArgs),

    /// Fetch, verify, and build a formula into the cellar.
    Install(InstallArgs),

    /// Check every formula file in the formulas directory for problems.
    Audit(AuditArgs),

    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Show version information.
    Version,
}

/// Arguments for `keg init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to create the .keg directory (default: current directory).
    pub path: Option<PathBuf>,
}

/// Arguments for `keg list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show every version instead of only the newest per package.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for `keg info`.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Formula spec: `name` (newest version) or `name@version`.
    pub spec: String,
}

/// Arguments for `keg fetch`.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Formula spec: `name` or `name@version`.
    pub spec: String,

    /// Write the archive here instead of the cache directory.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `keg verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Formula spec: `name` or `name@version`.
    pub spec: String,

    /// Path to the local archive to check.
    #[arg(long)]
    pub archive: PathBuf,
}

/// Arguments for `keg install`.
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Formula spec: `name` or `name@version`.
    pub spec: String,

    /// Install prefix (default: <cellar>/<name>/<version>).
    #[arg(long)]
    pub prefix: Option<PathBuf>,
}

/// Arguments for `keg audit`.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Exit non-zero on the first problem instead of reporting all.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `keg completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Target shell.
    pub shell: Shell,
}
