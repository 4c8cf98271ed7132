pub mod check_all;
pub mod validate;

use anyhow::{Context, Result};
use quality_validator::Table;
use std::path::Path;

/// Loads a table from a JSON file containing an array of records.
pub fn load_table(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    let table: Table = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse records from: {}", path.display()))?;
    Ok(table)
}
