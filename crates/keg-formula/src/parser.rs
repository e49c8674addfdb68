//! Parse formula files (TOML and JSON).
//!
//! Syntax errors surface as [`FormulaError::Parse`]; records that parse
//! but violate an invariant (missing field, no recognized checksum, bad
//! digest) surface as [`FormulaError::Malformed`]. Both are load-time
//! failures -- nothing is fetched or built for a record that fails here.

use std::path::Path;

use crate::types::{Formula, FormulaError, RawFormula};

/// Parse a formula from a TOML string.
pub fn parse_toml(content: &str) -> Result<Formula, FormulaError> {
    let raw: RawFormula =
        toml::from_str(content).map_err(|e| FormulaError::Parse(e.to_string()))?;
    Formula::try_from(raw)
}

/// Parse a formula from a JSON string.
pub fn parse_json(content: &str) -> Result<Formula, FormulaError> {
    let raw: RawFormula =
        serde_json::from_str(content).map_err(|e| FormulaError::Parse(e.to_string()))?;
    Formula::try_from(raw)
}

/// Load a formula from a file path (auto-detect TOML vs JSON by extension).
pub fn load_formula(path: &Path) -> Result<Formula, FormulaError> {
    let content = std::fs::read_to_string(path)?;
    let mut formula = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content)?,
        Some("json") => parse_json(&content)?,
        _ => {
            // Try JSON first, then TOML
            parse_json(&content).or_else(|_| parse_toml(&content))?
        }
    };
    formula.source = path.display().to_string();
    Ok(formula)
}
