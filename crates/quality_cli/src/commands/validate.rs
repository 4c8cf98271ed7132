use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use quality_core::QualityReport;
use quality_validator::QualityEngine;
use tracing::info;

use crate::commands::load_table;
use crate::output;

pub fn execute(data_path: &str, entity: &str, format: &str, output_path: Option<&str>) -> Result<()> {
    info!("Validating table: {} as entity '{}'", data_path, entity);

    let table = load_table(Path::new(data_path))?;
    output::print_info(&format!(
        "Loaded {} records from {}",
        table.len(),
        data_path
    ));

    let mut engine = QualityEngine::new();
    let report = engine
        .validate_table(entity, &table)
        .context("Validation failed")?;

    output::print_table_report(entity, &report, format);

    if let Some(path) = output_path {
        let mut tables = BTreeMap::new();
        tables.insert(entity.to_string(), report.clone());
        QualityReport::new(tables, None)
            .write_json(path)
            .with_context(|| format!("Failed to write report to {path}"))?;
        output::print_success(&format!("Report written to {path}"));
    }

    if report.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}
