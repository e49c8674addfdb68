//! `keg audit` -- check every formula file for problems.
//!
//! Unlike the registry loader, which aborts on the first bad record,
//! audit visits every file and reports all problems at once: parse
//! errors, malformed records, and duplicate `(name, version)` pairs.

use std::path::PathBuf;

use anyhow::{bail, Result};

use keg_formula::parser::load_formula;
use keg_formula::registry::FormulaRegistry;

use crate::cli::AuditArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

/// Execute the `keg audit` command.
pub fn run(ctx: &RuntimeContext, args: &AuditArgs) -> Result<()> {
    let formulas_dir = ctx.formulas_dir()?;

    let mut paths: Vec<PathBuf> = std::fs::read_dir(&formulas_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("toml") | Some("json")
            )
        })
        .collect();
    paths.sort();

    let mut registry = FormulaRegistry::default();
    // (file, status, detail)
    let mut rows: Vec<(String, bool, String)> = Vec::new();

    for path in &paths {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let outcome = load_formula(path).and_then(|f| {
            let id = f.id();
            registry.insert(f).map(|_| id)
        });

        match outcome {
            Ok(id) => rows.push((file, true, id)),
            Err(e) => {
                if args.strict {
                    bail!("{}: {}", file, e);
                }
                rows.push((file, false, e.to_string()));
            }
        }
    }

    let problems = rows.iter().filter(|(_, ok, _)| !ok).count();

    if ctx.json {
        let report: Vec<_> = rows
            .iter()
            .map(|(file, ok, detail)| {
                serde_json::json!({
                    "file": file,
                    "ok": ok,
                    "detail": detail,
                })
            })
            .collect();
        output_json(&serde_json::json!({
            "checked": rows.len(),
            "problems": problems,
            "results": report,
        }));
    } else {
        let headers = &["FILE", "STATUS", "DETAIL"];
        let table: Vec<Vec<String>> = rows
            .iter()
            .map(|(file, ok, detail)| {
                vec![
                    file.clone(),
                    if *ok { "ok" } else { "FAIL" }.to_string(),
                    detail.clone(),
                ]
            })
            .collect();
        output_table(headers, &table);
        if !ctx.quiet {
            println!();
            println!("{} formula(s) checked, {} problem(s)", rows.len(), problems);
        }
    }

    if problems > 0 {
        bail!("{} formula file(s) failed audit", problems);
    }
    Ok(())
}
