//! Report types for table, cross-reference, and aggregate results.
//!
//! All reports are plain serializable structs suitable for JSON export.
//! They are built once per validation pass; the engine holds no cross-call
//! report state, so callers wanting running aggregates fold reports
//! themselves via [`ValidationSummary::from_reports`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::violation::Violation;

/// A per-row issue in a table report.
///
/// Carries the row index, the violation details, and a snapshot of the
/// offending record so reports are self-contained for debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowIssue {
    /// Zero-based row index in the validated table
    pub row_index: usize,

    /// Field the violation refers to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Violation kind label (e.g., "format_error")
    pub error_type: String,

    /// Human-readable description
    pub error_message: String,

    /// Snapshot of the record that produced the violation
    pub record_data: serde_json::Value,
}

/// Aggregated validation results for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
    /// Number of records in the table
    pub total_records: usize,

    /// Records with zero error-severity violations
    pub valid_records: usize,

    /// Records with at least one error-severity violation
    pub invalid_records: usize,

    /// `valid_records / total_records`, or 0.0 for an empty table
    pub data_quality_score: f64,

    /// Per-row violations in row order
    pub validation_errors: Vec<RowIssue>,

    /// Table-level findings: duplicate keys, per-column null statistics
    pub table_issues: Vec<Violation>,
}

impl TableReport {
    /// Computes the quality score from the two counts.
    ///
    /// Defined as 0.0 for an empty table.
    pub fn score(valid_records: usize, total_records: usize) -> f64 {
        if total_records == 0 {
            0.0
        } else {
            valid_records as f64 / total_records as f64
        }
    }

    /// Returns true if the report contains any error-severity finding.
    pub fn has_errors(&self) -> bool {
        !self.validation_errors.is_empty() || self.table_issues.iter().any(Violation::is_error)
    }
}

/// A single cross-reference finding between two tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossReferenceIssue {
    /// Relationship label (e.g., "sales_users")
    #[serde(rename = "type")]
    pub issue_type: String,

    /// Number of orphaned rows found
    pub count: usize,

    /// Human-readable description
    pub message: String,
}

/// Referential-integrity results across a set of tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossReferenceReport {
    /// One entry per relationship with orphans
    pub cross_reference_issues: Vec<CrossReferenceIssue>,

    /// Offending foreign-key values per relationship, sorted and deduplicated
    pub orphaned_records: BTreeMap<String, BTreeSet<String>>,
}

impl CrossReferenceReport {
    /// Returns true if any relationship has orphaned rows.
    pub fn has_orphans(&self) -> bool {
        !self.cross_reference_issues.is_empty()
    }
}

/// Aggregate statistics across a set of table reports.
///
/// A pure fold over [`TableReport`]s; never stored inside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Number of tables summarized
    pub table_count: usize,

    /// Records across all tables
    pub total_records: usize,

    /// Valid records across all tables
    pub total_valid_records: usize,

    /// Invalid records across all tables
    pub total_invalid_records: usize,

    /// `total_valid_records / total_records`, or 0.0 with no records
    pub overall_quality_score: f64,

    /// Per-table quality scores
    pub table_scores: BTreeMap<String, f64>,
}

impl ValidationSummary {
    /// Folds a set of named table reports into a summary.
    pub fn from_reports<'a, I>(reports: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a TableReport)>,
    {
        let mut summary = Self {
            table_count: 0,
            total_records: 0,
            total_valid_records: 0,
            total_invalid_records: 0,
            overall_quality_score: 0.0,
            table_scores: BTreeMap::new(),
        };

        for (name, report) in reports {
            summary.table_count += 1;
            summary.total_records += report.total_records;
            summary.total_valid_records += report.valid_records;
            summary.total_invalid_records += report.invalid_records;
            summary
                .table_scores
                .insert(name.clone(), report.data_quality_score);
        }

        summary.overall_quality_score =
            TableReport::score(summary.total_valid_records, summary.total_records);
        summary
    }
}

/// The exportable report envelope.
///
/// Bundles the aggregate summary, per-table detail, optional cross-reference
/// results, and a generation timestamp into one JSON-serializable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Aggregate statistics
    pub validation_summary: ValidationSummary,

    /// Per-table reports, keyed by table name
    pub tables: BTreeMap<String, TableReport>,

    /// Cross-reference results, when the checker was run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_references: Option<CrossReferenceReport>,

    /// ISO-8601 generation timestamp
    pub generated_at: String,
}

impl QualityReport {
    /// Builds a report envelope, stamping it with the current time.
    pub fn new(
        tables: BTreeMap<String, TableReport>,
        cross_references: Option<CrossReferenceReport>,
    ) -> Self {
        let validation_summary = ValidationSummary::from_reports(tables.iter());
        Self {
            validation_summary,
            tables,
            cross_references,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Serializes the report as pretty-printed JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report as JSON to the given path.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
