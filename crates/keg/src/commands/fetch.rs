//! `keg fetch` -- fetch and verify a formula's source archive.
//!
//! Downloads the archive, checks it against the formula's digest, and
//! leaves it in the cache directory (or at `--output`). Nothing is
//! built.

use std::fs;

use anyhow::{Context, Result};

use keg_fetch::fetcher::{ArchiveFetcher, Fetcher};
use keg_formula::registry::FormulaRegistry;

use crate::cli::FetchArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `keg fetch` command.
pub fn run(ctx: &RuntimeContext, args: &FetchArgs) -> Result<()> {
    let formulas_dir = ctx.formulas_dir()?;
    let registry = FormulaRegistry::load_dir(&formulas_dir)?;
    let formula = registry.resolve(&args.spec)?;

    let fetcher = ArchiveFetcher::new();
    let bytes = fetcher
        .fetch(formula.source_url())
        .with_context(|| format!("fetching {}", formula.id()))?;

    // A mismatching archive is never written to disk.
    formula.verify(&bytes)?;

    let destination = match &args.output {
        Some(path) => path.clone(),
        None => {
            let cache = ctx.cache_dir()?;
            fs::create_dir_all(&cache)?;
            let file_name = formula
                .source_url()
                .rsplit('/')
                .next()
                .unwrap_or(&formula.name)
                .to_string();
            cache.join(file_name)
        }
    };
    fs::write(&destination, &bytes)
        .with_context(|| format!("writing archive to {}", destination.display()))?;

    if ctx.json {
        output_json(&serde_json::json!({
            "formula": formula.id(),
            "archive": destination.display().to_string(),
            "bytes": bytes.len(),
            "algorithm": formula.checksum.algorithm(),
            "digest": formula.checksum.digest(),
        }));
    } else if !ctx.quiet {
        println!(
            "Fetched {} ({} bytes, {} verified) -> {}",
            formula.id(),
            bytes.len(),
            formula.checksum.algorithm(),
            destination.display()
        );
    }

    Ok(())
}
