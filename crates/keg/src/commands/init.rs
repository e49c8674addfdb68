//! `keg init` -- initialize a `.keg/` directory.

use std::env;
use std::fs;

use anyhow::{Context, Result};

use keg_config::config::{save_config, KegConfig};
use keg_config::keg_dir::ensure_keg_dir;

use crate::cli::InitArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `keg init` command.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    let base = match &args.path {
        Some(p) => p.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let keg_dir = ensure_keg_dir(&base)
        .with_context(|| format!("failed to create .keg under {}", base.display()))?;

    // Write a default config only on first init; re-running is harmless.
    let config_path = keg_dir.join("config.yaml");
    if !config_path.exists() {
        save_config(&keg_dir, &KegConfig::default())?;
    }

    let config = KegConfig::default();
    fs::create_dir_all(config.formulas_dir(&keg_dir))?;
    fs::create_dir_all(config.cellar_dir(&keg_dir))?;
    fs::create_dir_all(config.cache_dir(&keg_dir))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "keg_dir": keg_dir.display().to_string(),
        }));
    } else if !ctx.quiet {
        println!("Initialized keg directory at {}", keg_dir.display());
    }

    Ok(())
}
