//! Violation and per-record outcome types.
//!
//! A [`Violation`] is a single detected deviation from a schema or business
//! rule. Violations are produced by the validator, never mutated, and
//! collected into append-only lists. Expected-bad-input is always signalled
//! through these values rather than through errors.

use serde::{Deserialize, Serialize};

/// Classification of a detected violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is absent from the record
    MissingField,
    /// A required field is present but null
    NullValue,
    /// A pattern, type, range, length, or enum constraint failed
    FormatError,
    /// A cross-field business invariant failed
    BusinessRule,
    /// A primary-key value occurs more than once in a table
    Duplicate,
    /// A foreign-key value has no matching primary key
    OrphanReference,
}

impl ViolationKind {
    /// Returns the snake_case label used in serialized reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MissingField => "missing_field",
            ViolationKind::NullValue => "null_value",
            ViolationKind::FormatError => "format_error",
            ViolationKind::BusinessRule => "business_rule",
            ViolationKind::Duplicate => "duplicate",
            ViolationKind::OrphanReference => "orphan_reference",
        }
    }
}

/// Severity of a violation.
///
/// Only `Error` violations flip a record or table to invalid; `Warning`
/// violations are reported but never affect validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Invalidates the record or table
    Error,
    /// Reported without affecting validity
    Warning,
}

/// A single detected deviation from a schema or business rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Field the violation refers to, if any (table-level checks may omit it)
    pub field: Option<String>,

    /// Violation classification
    pub kind: ViolationKind,

    /// Severity level
    pub severity: Severity,

    /// Human-readable description of the failure
    pub message: String,

    /// Number of affected values, for aggregate table-level checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Violation {
    /// Creates a missing-field violation.
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            message: format!("Required field '{field}' is missing"),
            field: Some(field),
            kind: ViolationKind::MissingField,
            severity: Severity::Error,
            count: None,
        }
    }

    /// Creates a null-value violation for a required field.
    pub fn null_value(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            message: format!("Required field '{field}' is null"),
            field: Some(field),
            kind: ViolationKind::NullValue,
            severity: Severity::Error,
            count: None,
        }
    }

    /// Creates a format-error violation.
    pub fn format_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            kind: ViolationKind::FormatError,
            severity: Severity::Error,
            message: message.into(),
            count: None,
        }
    }

    /// Creates a business-rule violation.
    pub fn business_rule(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            kind: ViolationKind::BusinessRule,
            severity: Severity::Error,
            message: message.into(),
            count: None,
        }
    }

    /// Creates a duplicate-key violation.
    pub fn duplicate(field: impl Into<String>, count: usize) -> Self {
        let field = field.into();
        Self {
            message: format!("Found {count} duplicate records based on '{field}'"),
            field: Some(field),
            kind: ViolationKind::Duplicate,
            severity: Severity::Error,
            count: Some(count),
        }
    }

    /// Downgrades the violation to warning severity.
    pub fn as_warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }

    /// Returns true if this violation has error severity.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// The outcome of validating a single record.
///
/// Created once per input record and never mutated afterwards. A record is
/// valid iff it produced zero error-severity violations; warnings do not
/// flip validity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// Zero-based index of the record in its table
    pub record_index: usize,

    /// Whether the record passed validation
    pub is_valid: bool,

    /// Violations detected, in evaluation order
    pub violations: Vec<Violation>,
}

impl RecordOutcome {
    /// Builds an outcome from collected violations, deriving validity from
    /// the severity split.
    pub fn new(record_index: usize, violations: Vec<Violation>) -> Self {
        let is_valid = !violations.iter().any(Violation::is_error);
        Self {
            record_index,
            is_valid,
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_field_violation() {
        let v = Violation::missing_field("email");
        assert_eq!(v.field.as_deref(), Some("email"));
        assert_eq!(v.kind, ViolationKind::MissingField);
        assert_eq!(v.severity, Severity::Error);
        assert!(v.message.contains("email"));
    }

    #[test]
    fn test_warning_does_not_flip_validity() {
        let outcome = RecordOutcome::new(
            0,
            vec![Violation::format_error("phone", "odd spacing").as_warning()],
        );
        assert!(outcome.is_valid);
        assert_eq!(outcome.violations.len(), 1);
    }

    #[test]
    fn test_error_flips_validity() {
        let outcome = RecordOutcome::new(3, vec![Violation::null_value("age")]);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.record_index, 3);
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&ViolationKind::OrphanReference).unwrap();
        assert_eq!(json, "\"orphan_reference\"");
        assert_eq!(ViolationKind::OrphanReference.as_str(), "orphan_reference");
    }
}
