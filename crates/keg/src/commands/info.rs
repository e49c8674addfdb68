//! `keg info` -- show one formula in detail.

use anyhow::Result;

use keg_formula::registry::FormulaRegistry;

use crate::cli::InfoArgs;
use crate::context::RuntimeContext;
use crate::output::{format_formula_detail, output_json, FormulaView};

/// Execute the `keg info` command.
pub fn run(ctx: &RuntimeContext, args: &InfoArgs) -> Result<()> {
    let formulas_dir = ctx.formulas_dir()?;
    let registry = FormulaRegistry::load_dir(&formulas_dir)?;
    let formula = registry.resolve(&args.spec)?;

    if ctx.json {
        output_json(&FormulaView::from_formula(formula));
        return Ok(());
    }

    println!("{}", format_formula_detail(formula));

    // Preview the build pipeline against the effective prefix when one
    // can be resolved; purely informational.
    if let Ok(cellar) = ctx.cellar_dir() {
        let prefix = cellar.join(&formula.name).join(&formula.version);
        println!();
        println!("BUILD");
        for command in formula.build_commands(&prefix) {
            println!("  {}", command.display());
        }
    }

    // Other known versions of the same package.
    if let Some(versions) = registry.versions(&formula.name) {
        if versions.len() > 1 {
            let list: Vec<&str> = versions.iter().map(|f| f.version.as_str()).collect();
            println!();
            println!("Versions: {}", list.join(", "));
        }
    }

    Ok(())
}
