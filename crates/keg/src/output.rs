//! Output formatting helpers for the `keg` CLI.
//!
//! Provides JSON output, table formatting, and human-readable formula
//! display in both compact (one-liner) and detailed (multi-line) formats.

use keg_formula::types::Formula;
use serde::Serialize;
use std::io::{self, Write};

/// A view model for JSON output of one formula.
///
/// The checksum is flattened to `algorithm` + `digest` so consumers do
/// not need to know which algorithms exist.
#[derive(Serialize)]
pub struct FormulaView {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    pub url: String,
    pub algorithm: String,
    pub digest: String,
    pub configure_args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl FormulaView {
    /// Build a `FormulaView` from a formula record.
    ///
    /// `homepage` and `source` are omitted when empty.
    pub fn from_formula(formula: &Formula) -> Self {
        Self {
            name: formula.name.clone(),
            version: formula.version.clone(),
            homepage: if formula.homepage.is_empty() {
                None
            } else {
                Some(formula.homepage.clone())
            },
            url: formula.url.clone(),
            algorithm: formula.checksum.algorithm().to_string(),
            digest: formula.checksum.digest().to_string(),
            configure_args: formula.configure_args.clone(),
            source: if formula.source.is_empty() {
                None
            } else {
                Some(formula.source.clone())
            },
        }
    }
}

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows.
///
/// Each row is a `Vec<String>` with columns matching the headers.
/// Column widths are computed from the data for alignment.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    // Compute column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    // Print header
    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{:<width$}", header, width = widths[i]);
    }
    let _ = writeln!(handle);

    // Print separator
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{}", "-".repeat(*width));
    }
    let _ = writeln!(handle);

    // Print rows
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                let _ = write!(handle, "  ");
            }
            if i < widths.len() {
                let _ = write!(handle, "{:<width$}", cell, width = widths[i]);
            } else {
                let _ = write!(handle, "{}", cell);
            }
        }
        let _ = writeln!(handle);
    }
}

/// Format a formula as a compact one-line string.
///
/// Format: `{name}@{version} ({algorithm}) {url}`
pub fn format_formula_compact(formula: &Formula) -> String {
    format!(
        "{} ({}) {}",
        formula.id(),
        formula.checksum.algorithm(),
        formula.url
    )
}

/// Format a formula in detailed multi-line view.
///
/// Shows all populated fields with section headers.
pub fn format_formula_detail(formula: &Formula) -> String {
    let mut lines = Vec::new();

    lines.push(format!("{} {}", formula.name, formula.version));
    if !formula.homepage.is_empty() {
        lines.push(format!("Homepage: {}", formula.homepage));
    }
    lines.push(format!("URL: {}", formula.url));
    lines.push(format!(
        "Checksum: {} {}",
        formula.checksum.algorithm(),
        formula.checksum.digest()
    ));
    if !formula.configure_args.is_empty() {
        lines.push(format!(
            "Configure args: {}",
            formula.configure_args.join(" ")
        ));
    }
    if !formula.source.is_empty() {
        lines.push(format!("Loaded from: {}", formula.source));
    }

    lines.join("\n")
}

/// Format a formula as a compact row for list output.
///
/// Returns a vector of column values suitable for [`output_table`].
pub fn format_formula_row(formula: &Formula) -> Vec<String> {
    vec![
        formula.name.clone(),
        formula.version.clone(),
        formula.checksum.algorithm().to_string(),
        formula.url.clone(),
    ]
}
