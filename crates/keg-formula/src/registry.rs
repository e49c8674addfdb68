//! The formula registry: every loaded record, keyed by name and version.
//!
//! A logical package may carry several historical revisions (the seed data
//! has four HDF5 records differing only in URL and checksum). The registry
//! keeps them all; version selection is a lookup concern, not a property
//! of the record.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use crate::parser::load_formula;
use crate::types::{Formula, FormulaError};

/// All formulas loaded from a formulas directory.
#[derive(Debug, Default)]
pub struct FormulaRegistry {
    /// name -> versions, ascending by [`compare_versions`].
    entries: BTreeMap<String, Vec<Formula>>,
}

impl FormulaRegistry {
    /// Load every `*.toml` / `*.json` formula under `dir`.
    ///
    /// Files are visited in name order so failures are reported
    /// deterministically. A record that fails to parse or validate aborts
    /// the whole load; a duplicate `(name, version)` pair is an error.
    pub fn load_dir(dir: &Path) -> Result<Self, FormulaError> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
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

        let mut registry = Self::default();
        for path in paths {
            registry.insert(load_formula(&path)?)?;
        }
        Ok(registry)
    }

    /// Add one formula, rejecting duplicate `(name, version)` pairs.
    pub fn insert(&mut self, formula: Formula) -> Result<(), FormulaError> {
        let versions = self.entries.entry(formula.name.clone()).or_default();
        if versions.iter().any(|f| f.version == formula.version) {
            return Err(FormulaError::DuplicateVersion {
                name: formula.name,
                version: formula.version,
            });
        }
        let at = versions
            .binary_search_by(|f| compare_versions(&f.version, &formula.version))
            .unwrap_or_else(|i| i);
        versions.insert(at, formula);
        Ok(())
    }

    /// Package names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// All versions of a package, ascending. `None` for unknown names.
    pub fn versions(&self, name: &str) -> Option<&[Formula]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// The newest version of a package.
    pub fn latest(&self, name: &str) -> Result<&Formula, FormulaError> {
        self.entries
            .get(name)
            .and_then(|v| v.last())
            .ok_or_else(|| FormulaError::UnknownFormula(name.to_string()))
    }

    /// Exact `(name, version)` lookup.
    pub fn get(&self, name: &str, version: &str) -> Result<&Formula, FormulaError> {
        self.entries
            .get(name)
            .and_then(|v| v.iter().find(|f| f.version == version))
            .ok_or_else(|| FormulaError::UnknownFormula(format!("{}@{}", name, version)))
    }

    /// Resolve a `name` or `name@version` spec string.
    pub fn resolve(&self, spec: &str) -> Result<&Formula, FormulaError> {
        match spec.split_once('@') {
            Some((name, version)) => self.get(name, version),
            None => self.latest(spec),
        }
    }

    /// Iterate all formulas, by name then ascending version.
    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.entries.values().flatten()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// `true` when no formulas are loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compare two version strings segment-wise.
///
/// Segments are split on `.` and `-`; all-numeric segments compare
/// numerically, mixed segments lexicographically, and a missing segment
/// sorts before any present one ("1.8.15" < "1.8.15-patch1" < "1.8.16").
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let split = |v: &str| -> Vec<String> {
        v.split(['.', '-']).map(str::to_string).collect()
    };
    let (a, b) = (split(a), split(b));

    for i in 0..a.len().max(b.len()) {
        let ord = match (a.get(i), b.get(i)) {
            (Some(x), Some(y)) => compare_segment(x, y),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn compare_segment(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        // Numeric segments sort before non-numeric ones.
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
