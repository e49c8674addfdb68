//! `keg install` -- fetch, verify, and build a formula into the cellar.

use std::fs;

use anyhow::{Context, Result};

use keg_fetch::fetcher::ArchiveFetcher;
use keg_formula::registry::FormulaRegistry;
use keg_install::executor::ProcessExecutor;
use keg_install::pipeline::{install, InstallOptions};

use crate::cli::InstallArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `keg install` command.
pub fn run(ctx: &RuntimeContext, args: &InstallArgs) -> Result<()> {
    let formulas_dir = ctx.formulas_dir()?;
    let registry = FormulaRegistry::load_dir(&formulas_dir)?;
    let formula = registry.resolve(&args.spec)?;

    let prefix = match &args.prefix {
        Some(p) => p.clone(),
        None => ctx
            .cellar_dir()?
            .join(&formula.name)
            .join(&formula.version),
    };
    fs::create_dir_all(&prefix)
        .with_context(|| format!("creating install prefix {}", prefix.display()))?;

    // Build scratch lives in the cache and is removed on success; kept on
    // failure so the build tree can be inspected.
    let cache = ctx.cache_dir()?;
    fs::create_dir_all(&cache)?;
    let workdir = tempfile::Builder::new()
        .prefix(&format!("build-{}-{}-", formula.name, formula.version))
        .tempdir_in(&cache)?;

    let fetcher = ArchiveFetcher::new();
    let mut executor = ProcessExecutor;
    let opts = InstallOptions {
        prefix: prefix.clone(),
        workdir: workdir.path().to_path_buf(),
    };

    if let Err(e) = install(formula, &fetcher, &mut executor, &opts) {
        let kept = workdir.keep();
        return Err(e).with_context(|| {
            format!(
                "installing {} (build tree kept at {})",
                formula.id(),
                kept.display()
            )
        });
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "formula": formula.id(),
            "prefix": prefix.display().to_string(),
        }));
    } else if !ctx.quiet {
        println!("Installed {} to {}", formula.id(), prefix.display());
    }

    Ok(())
}
