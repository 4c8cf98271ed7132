//! Table-level validation.
//!
//! Iterates a table once in input order, validating each record and folding
//! outcomes into a [`TableReport`]. Two table-wide checks run after the row
//! pass: duplicate-primary-key detection and per-column null statistics.

use std::collections::HashSet;

use quality_core::{EntitySchema, RowIssue, Severity, TableReport, Violation, ViolationKind};

use crate::dataset::{Record, Table};
use crate::record::RecordValidator;

/// Null percentage above which a column's null statistic escalates from
/// warning to error.
const NULL_ERROR_THRESHOLD_PCT: f64 = 10.0;

/// Validates whole tables against an entity schema.
#[derive(Debug, Default)]
pub struct TableValidator {
    record_validator: RecordValidator,
}

impl TableValidator {
    /// Creates a new table validator.
    pub fn new() -> Self {
        Self {
            record_validator: RecordValidator::new(),
        }
    }

    /// Validates every record of a table, in input order.
    ///
    /// Row indices in the returned report are stable and reproducible:
    /// validating the same table twice yields identical reports.
    pub fn validate(&mut self, schema: &EntitySchema, table: &Table) -> TableReport {
        let mut valid_records = 0;
        let mut invalid_records = 0;
        let mut validation_errors = Vec::new();

        for (row_index, record) in table.rows().enumerate() {
            let outcome = self.record_validator.validate(schema, record, row_index);

            if outcome.is_valid {
                valid_records += 1;
            } else {
                invalid_records += 1;
            }

            if !outcome.violations.is_empty() {
                let record_data =
                    serde_json::to_value(record).unwrap_or(serde_json::Value::Null);
                for violation in outcome.violations {
                    validation_errors.push(RowIssue {
                        row_index,
                        field: violation.field,
                        error_type: violation.kind.as_str().to_string(),
                        error_message: violation.message,
                        record_data: record_data.clone(),
                    });
                }
            }
        }

        let mut table_issues = Vec::new();
        if let Some(violation) = check_duplicate_keys(schema, table) {
            table_issues.push(violation);
        }
        table_issues.extend(check_null_percentages(schema, table));

        TableReport {
            total_records: table.len(),
            valid_records,
            invalid_records,
            data_quality_score: TableReport::score(valid_records, table.len()),
            validation_errors,
            table_issues,
        }
    }
}

/// Counts repeated primary-key values across the table.
fn check_duplicate_keys(schema: &EntitySchema, table: &Table) -> Option<Violation> {
    let mut seen = HashSet::new();
    let mut duplicates = 0;

    for row in table.rows() {
        let Some(key) = key_of(row, &schema.primary_key) else {
            continue; // Absent keys are reported by record validation
        };
        if !seen.insert(key) {
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        return Some(Violation::duplicate(&schema.primary_key, duplicates));
    }

    None
}

/// Extracts a record's primary-key value as a comparable string.
fn key_of(row: &Record, primary_key: &str) -> Option<String> {
    let value = row.get(primary_key)?;
    if value.is_null() {
        return None;
    }
    Some(value.to_string())
}

/// Reports null/absent counts per declared column.
///
/// Severity is warning up to the 10% threshold, error above it.
fn check_null_percentages(schema: &EntitySchema, table: &Table) -> Vec<Violation> {
    let total = table.len();
    if total == 0 {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for field in &schema.fields {
        let nulls = table
            .rows()
            .filter(|row| row.get(&field.name).is_none_or(|v| v.is_null()))
            .count();
        if nulls == 0 {
            continue;
        }

        let pct = (nulls as f64 / total as f64) * 100.0;
        let mut violation = Violation {
            field: Some(field.name.clone()),
            kind: ViolationKind::NullValue,
            severity: Severity::Error,
            message: format!(
                "Field '{}' has {} null values ({:.2}%)",
                field.name, nulls, pct
            ),
            count: Some(nulls),
        };
        if pct <= NULL_ERROR_THRESHOLD_PCT {
            violation = violation.as_warning();
        }
        issues.push(violation);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quality_core::{FieldBuilder, FieldType, SchemaBuilder, Severity, ViolationKind};

    use crate::dataset::DataValue;

    fn id_schema() -> EntitySchema {
        SchemaBuilder::new("users", "user_id")
            .field(
                FieldBuilder::new("user_id", FieldType::Text)
                    .pattern(r"^U\d{6}$")
                    .build(),
            )
            .field(FieldBuilder::new("email", FieldType::Text).optional().build())
            .build()
    }

    fn row(id: &str) -> Record {
        let mut row = Record::new();
        row.insert("user_id".to_string(), DataValue::String(id.to_string()));
        row.insert("email".to_string(), DataValue::String("a@b.com".into()));
        row
    }

    #[test]
    fn test_empty_table() {
        let report = TableValidator::new().validate(&id_schema(), &Table::empty());
        assert_eq!(report.total_records, 0);
        assert_eq!(report.valid_records, 0);
        assert_eq!(report.invalid_records, 0);
        assert_eq!(report.data_quality_score, 0.0);
        assert!(report.validation_errors.is_empty());
        assert!(report.table_issues.is_empty());
    }

    #[test]
    fn test_counts_invariant() {
        let table = Table::from_rows(vec![row("U000001"), row("bad-id"), row("U000003")]);
        let report = TableValidator::new().validate(&id_schema(), &table);

        assert_eq!(report.total_records, 3);
        assert_eq!(report.valid_records + report.invalid_records, 3);
        assert_eq!(report.valid_records, 2);
        assert_eq!(report.invalid_records, 1);
        assert!((report.data_quality_score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_row_indices_preserved_in_order() {
        let table = Table::from_rows(vec![row("bad"), row("U000002"), row("also-bad")]);
        let report = TableValidator::new().validate(&id_schema(), &table);

        let indices: Vec<usize> = report.validation_errors.iter().map(|e| e.row_index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_row_issue_carries_record_snapshot() {
        let table = Table::from_rows(vec![row("oops")]);
        let report = TableValidator::new().validate(&id_schema(), &table);

        let issue = &report.validation_errors[0];
        assert_eq!(issue.error_type, "format_error");
        assert_eq!(issue.record_data["user_id"], "oops");
    }

    #[test]
    fn test_duplicate_primary_keys_detected() {
        let table = Table::from_rows(vec![
            row("U000001"),
            row("U000002"),
            row("U000001"),
            row("U000001"),
        ]);
        let report = TableValidator::new().validate(&id_schema(), &table);

        let duplicate = report
            .table_issues
            .iter()
            .find(|v| v.kind == ViolationKind::Duplicate)
            .expect("expected a duplicate violation");
        assert_eq!(duplicate.count, Some(2));
        assert_eq!(duplicate.severity, Severity::Error);
    }

    #[test]
    fn test_null_percentage_warning_below_threshold() {
        let mut rows: Vec<Record> = (0..20).map(|i| row(&format!("U{i:06}"))).collect();
        rows[0].insert("email".to_string(), DataValue::Null); // 5%

        let report = TableValidator::new().validate(&id_schema(), &Table::from_rows(rows));
        let null_issue = report
            .table_issues
            .iter()
            .find(|v| v.kind == ViolationKind::NullValue)
            .expect("expected a null statistic");
        assert_eq!(null_issue.severity, Severity::Warning);
        assert_eq!(null_issue.count, Some(1));
    }

    #[test]
    fn test_null_percentage_error_above_threshold() {
        let mut rows: Vec<Record> = (0..10).map(|i| row(&format!("U{i:06}"))).collect();
        rows[0].insert("email".to_string(), DataValue::Null);
        rows[1].remove("email"); // Absent counts as null: 20%

        let report = TableValidator::new().validate(&id_schema(), &Table::from_rows(rows));
        let null_issue = report
            .table_issues
            .iter()
            .find(|v| v.kind == ViolationKind::NullValue)
            .expect("expected a null statistic");
        assert_eq!(null_issue.severity, Severity::Error);
        assert_eq!(null_issue.count, Some(2));
        assert!(null_issue.message.contains("20.00%"));
    }

    #[test]
    fn test_warning_statistics_do_not_flip_record_validity() {
        // email is optional: a few nulls produce a warning statistic but all
        // records remain valid.
        let mut rows: Vec<Record> = (0..20).map(|i| row(&format!("U{i:06}"))).collect();
        rows[3].insert("email".to_string(), DataValue::Null);

        let report = TableValidator::new().validate(&id_schema(), &Table::from_rows(rows));
        assert_eq!(report.invalid_records, 0);
        assert_eq!(report.data_quality_score, 1.0);
    }

    #[test]
    fn test_idempotent_reports() {
        let table = Table::from_rows(vec![row("U000001"), row("nope"), row("U000001")]);
        let schema = id_schema();

        let first = TableValidator::new().validate(&schema, &table);
        let second = TableValidator::new().validate(&schema, &table);
        assert_eq!(first, second);
    }
}
