//! `keg list` -- list known formulas.

use anyhow::Result;

use keg_formula::registry::FormulaRegistry;

use crate::cli::ListArgs;
use crate::context::RuntimeContext;
use crate::output::{format_formula_row, output_json, output_table, FormulaView};

/// Execute the `keg list` command.
pub fn run(ctx: &RuntimeContext, args: &ListArgs) -> Result<()> {
    let formulas_dir = ctx.formulas_dir()?;
    let registry = FormulaRegistry::load_dir(&formulas_dir)?;

    let formulas: Vec<_> = if args.all {
        registry.iter().collect()
    } else {
        registry
            .names()
            .into_iter()
            .filter_map(|name| registry.latest(name).ok())
            .collect()
    };

    if ctx.json {
        let views: Vec<FormulaView> = formulas.iter().map(|f| FormulaView::from_formula(f)).collect();
        output_json(&views);
        return Ok(());
    }

    if formulas.is_empty() {
        if !ctx.quiet {
            println!("No formulas found in {}", formulas_dir.display());
        }
        return Ok(());
    }

    let headers = &["NAME", "VERSION", "CHECKSUM", "URL"];
    let rows: Vec<Vec<String>> = formulas.iter().map(|f| format_formula_row(f)).collect();
    output_table(headers, &rows);

    Ok(())
}
