//! Main validation engine.
//!
//! [`QualityEngine`] orchestrates table validation and cross-reference
//! checking against the fixed entity catalog, producing fresh report objects
//! per call. The engine keeps no report state between calls; callers wanting
//! running aggregates fold reports themselves via
//! [`ValidationSummary::from_reports`].

use std::collections::{BTreeMap, HashMap};

use quality_core::{
    CrossReferenceReport, Entity, QualityReport, Result, TableReport, ValidationSummary,
};
use tracing::{debug, info};

use crate::cross_reference::CrossReferenceChecker;
use crate::dataset::Table;
use crate::table::TableValidator;

/// Validation engine for the e-commerce dataset.
///
/// # Example
///
/// ```rust
/// use quality_validator::{QualityEngine, Table};
///
/// let mut engine = QualityEngine::new();
/// let report = engine.validate_table("users", &Table::empty()).unwrap();
/// assert_eq!(report.total_records, 0);
/// ```
#[derive(Debug, Default)]
pub struct QualityEngine {
    table_validator: TableValidator,
    cross_reference_checker: CrossReferenceChecker,
}

impl QualityEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self {
            table_validator: TableValidator::new(),
            cross_reference_checker: CrossReferenceChecker::new(),
        }
    }

    /// Validates one table by entity name.
    ///
    /// An unknown entity name is a misconfigured call site and fails fast
    /// with [`quality_core::QualityError::UnknownEntity`]; bad data never
    /// does. The report is always fully populated, even when every row is
    /// invalid.
    pub fn validate_table(&mut self, entity_name: &str, table: &Table) -> Result<TableReport> {
        let entity: Entity = entity_name.parse()?;
        Ok(self.validate_entity(entity, table))
    }

    /// Validates one table for a known entity.
    pub fn validate_entity(&mut self, entity: Entity, table: &Table) -> TableReport {
        debug!(entity = %entity, rows = table.len(), "validating table");
        let report = self.table_validator.validate(entity.schema(), table);
        info!(
            entity = %entity,
            total = report.total_records,
            valid = report.valid_records,
            score = report.data_quality_score,
            "table validated"
        );
        report
    }

    /// Validates every table in the map, keyed by entity name.
    ///
    /// Tables are processed in name order so failure behavior and report
    /// layout are deterministic. Any unknown table name fails the whole call.
    pub fn validate_all(
        &mut self,
        tables: &HashMap<String, Table>,
    ) -> Result<BTreeMap<String, TableReport>> {
        let mut names: Vec<&String> = tables.keys().collect();
        names.sort();

        let mut reports = BTreeMap::new();
        for name in names {
            let report = self.validate_table(name, &tables[name])?;
            reports.insert(name.clone(), report);
        }
        Ok(reports)
    }

    /// Runs referential-integrity checks across the loaded tables.
    pub fn check_cross_references(
        &self,
        tables: &HashMap<String, Table>,
    ) -> CrossReferenceReport {
        debug!(tables = tables.len(), "checking cross references");
        let report = self.cross_reference_checker.check(tables);
        info!(
            issues = report.cross_reference_issues.len(),
            "cross references checked"
        );
        report
    }

    /// Validates all tables, checks cross references, and bundles the
    /// results into an exportable report envelope.
    pub fn run(&mut self, tables: &HashMap<String, Table>) -> Result<QualityReport> {
        let reports = self.validate_all(tables)?;
        let cross_references = self.check_cross_references(tables);
        Ok(QualityReport::new(reports, Some(cross_references)))
    }

    /// Folds a set of table reports into aggregate statistics.
    pub fn summarize(reports: &BTreeMap<String, TableReport>) -> ValidationSummary {
        ValidationSummary::from_reports(reports.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quality_core::QualityError;

    use crate::dataset::{DataValue, Record};

    fn user_row(id: &str, age: i64) -> Record {
        let mut row = Record::new();
        for (key, value) in [
            ("user_id", DataValue::String(id.to_string())),
            ("first_name", "John".into()),
            ("last_name", "Doe".into()),
            ("email", "john@example.com".into()),
            ("phone", "123-456-7890".into()),
            ("address", "123 Main St".into()),
            ("city", "Anytown".into()),
            ("state", "CA".into()),
            ("zip_code", "12345".into()),
            ("country", "USA".into()),
            ("date_joined", "2024-01-01".into()),
            ("is_active", DataValue::Bool(true)),
            ("age", DataValue::Int(age)),
            ("gender", "M".into()),
        ] {
            row.insert(key.to_string(), value);
        }
        row
    }

    #[test]
    fn test_unknown_entity_fails_fast() {
        let mut engine = QualityEngine::new();
        let err = engine
            .validate_table("orders", &Table::empty())
            .unwrap_err();
        assert!(matches!(err, QualityError::UnknownEntity(ref n) if n == "orders"));
    }

    #[test]
    fn test_valid_users_table() {
        let table = Table::from_rows(vec![user_row("U000001", 30), user_row("U000002", 25)]);
        let mut engine = QualityEngine::new();

        let report = engine.validate_table("users", &table).unwrap();
        assert_eq!(report.total_records, 2);
        assert_eq!(report.valid_records, 2);
        assert_eq!(report.data_quality_score, 1.0);
        assert!(report.validation_errors.is_empty());
    }

    #[test]
    fn test_age_out_of_bounds() {
        let table = Table::from_rows(vec![user_row("U000001", 150)]);
        let mut engine = QualityEngine::new();

        let report = engine.validate_table("users", &table).unwrap();
        assert_eq!(report.invalid_records, 1);
        let issue = &report.validation_errors[0];
        assert_eq!(issue.field.as_deref(), Some("age"));
        assert!(issue.error_message.contains("[0, 120]"));
    }

    #[test]
    fn test_validate_all_and_summary() {
        let mut tables = HashMap::new();
        tables.insert(
            "users".to_string(),
            Table::from_rows(vec![user_row("U000001", 30), user_row("U000002", 150)]),
        );

        let mut engine = QualityEngine::new();
        let reports = engine.validate_all(&tables).unwrap();
        let summary = QualityEngine::summarize(&reports);

        assert_eq!(summary.table_count, 1);
        assert_eq!(summary.total_records, 2);
        assert_eq!(summary.total_valid_records, 1);
        assert_eq!(summary.overall_quality_score, 0.5);
    }

    #[test]
    fn test_validate_all_rejects_unknown_table() {
        let mut tables = HashMap::new();
        tables.insert("orders".to_string(), Table::empty());

        let mut engine = QualityEngine::new();
        assert!(engine.validate_all(&tables).is_err());
    }

    #[test]
    fn test_run_bundles_cross_references() {
        let mut tables = HashMap::new();
        tables.insert(
            "users".to_string(),
            Table::from_rows(vec![user_row("U000001", 30)]),
        );

        let mut sale = Record::new();
        sale.insert("user_id".to_string(), DataValue::String("U999999".into()));
        tables.insert("sales".to_string(), Table::from_rows(vec![sale]));

        let mut engine = QualityEngine::new();
        let report = engine.run(&tables).unwrap();

        assert_eq!(report.tables.len(), 2);
        let xrefs = report.cross_references.unwrap();
        assert_eq!(xrefs.cross_reference_issues.len(), 1);
        assert!(xrefs.orphaned_records["sales_users"].contains("U999999"));
    }
}
