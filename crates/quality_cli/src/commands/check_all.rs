use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use quality_core::Entity;
use quality_validator::QualityEngine;
use tracing::info;

use crate::commands::load_table;
use crate::output;

pub fn execute(dir: &str, format: &str, output_path: Option<&str>) -> Result<()> {
    info!("Checking dataset directory: {}", dir);

    let dir = Path::new(dir);
    let mut tables = HashMap::new();
    for entity in Entity::ALL {
        let path = dir.join(format!("{}.json", entity.table_name()));
        if !path.exists() {
            continue;
        }
        let table = load_table(&path)?;
        output::print_info(&format!(
            "Loaded {} {} records",
            table.len(),
            entity.table_name()
        ));
        tables.insert(entity.table_name().to_string(), table);
    }

    if tables.is_empty() {
        bail!(
            "No data files found in {}. Expected <entity>.json for: users, sellers, products, sales, payments",
            dir.display()
        );
    }

    let mut engine = QualityEngine::new();
    let report = engine.run(&tables).context("Validation failed")?;

    match format {
        "json" => output::print_json_report(&report),
        _ => {
            for (name, table_report) in &report.tables {
                output::print_table_report(name, table_report, format);
            }
            output::print_summary(&report.validation_summary);
            if let Some(xrefs) = &report.cross_references {
                output::print_cross_references(xrefs);
            }
        }
    }

    if let Some(path) = output_path {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write report to {path}"))?;
        output::print_success(&format!("Report written to {path}"));
    }

    let failed = report.tables.values().any(|t| t.has_errors())
        || report
            .cross_references
            .as_ref()
            .is_some_and(|x| x.has_orphans());
    if failed {
        std::process::exit(1);
    }

    Ok(())
}
