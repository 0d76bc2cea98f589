//! Loads the exporter definitions file into the typed rule table.

use crate::models::rules::RuleTable;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads and parses the definitions JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not contain the
/// required `Category Mapping` and `Colors` sections.
pub fn load_rule_table(path: &Path) -> Result<RuleTable> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read definitions file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Malformed definitions file {}", path.display()))
}
