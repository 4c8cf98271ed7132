//! Cross-table referential-integrity checking.
//!
//! Detects foreign-key orphans between validated tables for the three fixed
//! relationships of the dataset: sales→users, sales→products, and
//! payments→sales. The check is read-only set-difference; it does not depend
//! on the row-level validation outcome of either table.

use std::collections::{BTreeSet, HashMap, HashSet};

use quality_core::{CrossReferenceIssue, CrossReferenceReport};

use crate::dataset::Table;

/// One foreign-key relationship between two tables.
struct Relationship {
    /// Referencing table name
    child: &'static str,
    /// Foreign-key field in the referencing table
    foreign_key: &'static str,
    /// Referenced table name
    parent: &'static str,
    /// Primary-key field in the referenced table
    primary_key: &'static str,
    /// Label used in reports
    label: &'static str,
}

const RELATIONSHIPS: [Relationship; 3] = [
    Relationship {
        child: "sales",
        foreign_key: "user_id",
        parent: "users",
        primary_key: "user_id",
        label: "sales_users",
    },
    Relationship {
        child: "sales",
        foreign_key: "product_id",
        parent: "products",
        primary_key: "product_id",
        label: "sales_products",
    },
    Relationship {
        child: "payments",
        foreign_key: "sale_id",
        parent: "sales",
        primary_key: "sale_id",
        label: "payments_sales",
    },
];

/// Detects foreign-key orphans across a set of tables.
#[derive(Debug, Default)]
pub struct CrossReferenceChecker;

impl CrossReferenceChecker {
    /// Creates a new cross-reference checker.
    pub fn new() -> Self {
        Self
    }

    /// Checks all fixed relationships present in the table map.
    ///
    /// A relationship is skipped when either of its tables is absent. Null
    /// or missing foreign keys are not orphans; record validation already
    /// reports those.
    pub fn check(&self, tables: &HashMap<String, Table>) -> CrossReferenceReport {
        let mut report = CrossReferenceReport::default();

        for rel in &RELATIONSHIPS {
            let (Some(child), Some(parent)) = (tables.get(rel.child), tables.get(rel.parent))
            else {
                continue;
            };

            let known_keys: HashSet<String> = parent
                .rows()
                .filter_map(|row| row.get(rel.primary_key))
                .filter(|v| !v.is_null())
                .map(|v| v.to_string())
                .collect();

            let mut orphan_rows = 0;
            let mut orphan_keys = BTreeSet::new();
            for row in child.rows() {
                let Some(value) = row.get(rel.foreign_key) else {
                    continue;
                };
                if value.is_null() {
                    continue;
                }
                let key = value.to_string();
                if !known_keys.contains(&key) {
                    orphan_rows += 1;
                    orphan_keys.insert(key);
                }
            }

            if orphan_rows > 0 {
                report.cross_reference_issues.push(CrossReferenceIssue {
                    issue_type: rel.label.to_string(),
                    count: orphan_rows,
                    message: format!(
                        "Found {} {} records with invalid {} references",
                        orphan_rows, rel.child, rel.foreign_key
                    ),
                });
                report
                    .orphaned_records
                    .insert(rel.label.to_string(), orphan_keys);
            }
        }

        report
    }
}
