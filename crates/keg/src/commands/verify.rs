//! `keg verify` -- verify a local archive against a formula's checksum.

use std::fs;

use anyhow::{Context, Result};

use keg_formula::registry::FormulaRegistry;

use crate::cli::VerifyArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `keg verify` command.
pub fn run(ctx: &RuntimeContext, args: &VerifyArgs) -> Result<()> {
    let formulas_dir = ctx.formulas_dir()?;
    let registry = FormulaRegistry::load_dir(&formulas_dir)?;
    let formula = registry.resolve(&args.spec)?;

    let bytes = fs::read(&args.archive)
        .with_context(|| format!("reading archive {}", args.archive.display()))?;

    formula.verify(&bytes)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "formula": formula.id(),
            "archive": args.archive.display().to_string(),
            "algorithm": formula.checksum.algorithm(),
            "digest": formula.checksum.digest(),
            "ok": true,
        }));
    } else if !ctx.quiet {
        println!(
            "OK: {} matches {} {}",
            args.archive.display(),
            formula.checksum.algorithm(),
            formula.checksum.digest()
        );
    }

    Ok(())
}
