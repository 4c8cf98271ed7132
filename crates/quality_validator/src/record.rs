//! Per-record validation.
//!
//! A record walks through field checks (presence, nullability, type, then
//! constraints) and cross-field checks, producing a [`RecordOutcome`].
//! Cross-field rules run only when every field they reference passed its own
//! checks, so an already-invalid field never cascades into spurious
//! business-rule noise.

use std::collections::HashSet;

use quality_core::{
    CrossFieldRule, EntitySchema, FieldDef, FieldType, RecordOutcome, Violation,
};

use crate::constraints::ConstraintChecker;
use crate::dataset::{DataValue, Record};

/// Validates a single record against an entity schema.
#[derive(Debug, Default)]
pub struct RecordValidator {
    checker: ConstraintChecker,
}

impl RecordValidator {
    /// Creates a new record validator.
    pub fn new() -> Self {
        Self {
            checker: ConstraintChecker::new(),
        }
    }

    /// Validates one record, returning its outcome.
    ///
    /// Never fails: malformed input of any shape is captured as violations,
    /// so one bad record cannot abort validation of the rest of its table.
    pub fn validate(
        &mut self,
        schema: &EntitySchema,
        record: &Record,
        record_index: usize,
    ) -> RecordOutcome {
        let mut violations = Vec::new();
        let mut clean_fields: HashSet<&str> = HashSet::new();

        for field in &schema.fields {
            match self.validate_field(field, record) {
                Some(violation) => violations.push(violation),
                None => {
                    clean_fields.insert(field.name.as_str());
                }
            }
        }

        for rule in &schema.rules {
            if rule.fields().iter().all(|f| clean_fields.contains(f)) {
                if let Some(violation) = check_rule(rule, record) {
                    violations.push(violation);
                }
            }
        }

        RecordOutcome::new(record_index, violations)
    }

    /// Runs the field-check ladder: presence, nullability, type, constraints.
    fn validate_field(&mut self, field: &FieldDef, record: &Record) -> Option<Violation> {
        let value = match record.get(&field.name) {
            Some(v) => v,
            None => {
                if field.required {
                    return Some(Violation::missing_field(&field.name));
                }
                return None; // Missing optional field is OK
            }
        };

        if value.is_null() {
            if field.required {
                return Some(Violation::null_value(&field.name));
            }
            return None;
        }

        // Type mismatch skips constraint evaluation for the field
        if let Some(violation) = check_type(field, value) {
            return Some(violation);
        }

        for constraint in &field.constraints {
            if let Some(violation) = self.checker.check(&field.name, constraint, value) {
                return Some(violation);
            }
        }

        None
    }
}

/// Validates the type of a field value.
fn check_type(field: &FieldDef, value: &DataValue) -> Option<Violation> {
    let matches = match field.field_type {
        FieldType::Text => matches!(value, DataValue::String(_)),
        FieldType::Int => matches!(value, DataValue::Int(_)),
        FieldType::Float => matches!(value, DataValue::Float(_) | DataValue::Int(_)),
        FieldType::Bool => matches!(value, DataValue::Bool(_)),
        // Date fields accept a date value or an ISO-8601 string
        FieldType::Date => value.as_date().is_some(),
        FieldType::Any => true,
    };

    if !matches {
        return Some(Violation::format_error(
            &field.name,
            format!(
                "Type mismatch for field '{}': expected {}, found {}",
                field.name,
                field.field_type.as_str(),
                value.type_name()
            ),
        ));
    }

    None
}

/// Evaluates a cross-field rule against a record.
///
/// Referenced fields have already passed their own checks; if one is still
/// absent or non-numeric (an optional field, say), the rule is skipped
/// rather than reported.
fn check_rule(rule: &CrossFieldRule, record: &Record) -> Option<Violation> {
    let number = |name: &str| record.get(name).and_then(DataValue::as_float);

    match rule {
        CrossFieldRule::StrictlyGreater { field, than } => {
            let (left, right) = (number(field)?, number(than)?);
            if left <= right {
                return Some(Violation::business_rule(
                    field,
                    format!("{field} must exceed {than}"),
                ));
            }
            None
        }
        CrossFieldRule::ProductEquals {
            target,
            multiplicand,
            multiplier,
            tolerance,
        } => {
            let actual = number(target)?;
            let expected = number(multiplicand)? * number(multiplier)?;
            if (actual - expected).abs() > *tolerance {
                return Some(Violation::business_rule(
                    target,
                    format!(
                        "{target} {actual} does not match {multiplicand} * {multiplier} = {expected}"
                    ),
                ));
            }
            None
        }
        CrossFieldRule::DiscountedEquals {
            target,
            base,
            discount,
            tolerance,
        } => {
            let actual = number(target)?;
            let expected = number(base)? * (1.0 - number(discount)?);
            if (actual - expected).abs() > *tolerance {
                return Some(Violation::business_rule(
                    target,
                    format!("{target} {actual} does not match {base} * (1 - {discount}) = {expected}"),
                ));
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quality_core::{Constraint, FieldBuilder, SchemaBuilder, ViolationKind};

    fn product_schema() -> EntitySchema {
        SchemaBuilder::new("products", "product_id")
            .field(
                FieldBuilder::new("product_id", FieldType::Text)
                    .pattern(r"^P\d{6}$")
                    .build(),
            )
            .field(
                FieldBuilder::new("price", FieldType::Float)
                    .constraint(Constraint::Positive)
                    .build(),
            )
            .field(
                FieldBuilder::new("cost", FieldType::Float)
                    .constraint(Constraint::NonNegative)
                    .build(),
            )
            .rule(CrossFieldRule::StrictlyGreater {
                field: "price".to_string(),
                than: "cost".to_string(),
            })
            .build()
    }

    fn record(entries: &[(&str, DataValue)]) -> Record {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_valid_record() {
        let schema = product_schema();
        let row = record(&[
            ("product_id", "P000001".into()),
            ("price", 100.0.into()),
            ("cost", 60.0.into()),
        ]);

        let outcome = RecordValidator::new().validate(&schema, &row, 0);
        assert!(outcome.is_valid, "unexpected: {:?}", outcome.violations);
        assert!(outcome.violations.is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let schema = product_schema();
        let row = record(&[("product_id", "P000001".into()), ("price", 100.0.into())]);

        let outcome = RecordValidator::new().validate(&schema, &row, 2);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.record_index, 2);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].kind, ViolationKind::MissingField);
        assert_eq!(outcome.violations[0].field.as_deref(), Some("cost"));
    }

    #[test]
    fn test_null_required_field() {
        let schema = product_schema();
        let row = record(&[
            ("product_id", "P000001".into()),
            ("price", 100.0.into()),
            ("cost", DataValue::Null),
        ]);

        let outcome = RecordValidator::new().validate(&schema, &row, 0);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.violations[0].kind, ViolationKind::NullValue);
    }

    #[test]
    fn test_type_mismatch_is_format_error_not_crash() {
        let schema = product_schema();
        let row = record(&[
            ("product_id", "P000001".into()),
            ("price", "expensive".into()),
            ("cost", 60.0.into()),
        ]);

        let outcome = RecordValidator::new().validate(&schema, &row, 0);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].kind, ViolationKind::FormatError);
        assert!(outcome.violations[0].message.contains("Type mismatch"));
    }

    #[test]
    fn test_price_equal_to_cost_fails_business_rule() {
        let schema = product_schema();
        let row = record(&[
            ("product_id", "P000001".into()),
            ("price", 50.0.into()),
            ("cost", 50.0.into()),
        ]);

        let outcome = RecordValidator::new().validate(&schema, &row, 0);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].kind, ViolationKind::BusinessRule);
        assert_eq!(outcome.violations[0].message, "price must exceed cost");
    }

    #[test]
    fn test_cross_field_rule_short_circuits_on_invalid_field() {
        let schema = product_schema();
        // price fails its own Positive check; the price>cost rule must not
        // add a second violation on top.
        let row = record(&[
            ("product_id", "P000001".into()),
            ("price", (-5.0).into()),
            ("cost", 60.0.into()),
        ]);

        let outcome = RecordValidator::new().validate(&schema, &row, 0);
        assert_eq!(outcome.violations.len(), 1);
        assert_eq!(outcome.violations[0].kind, ViolationKind::FormatError);
    }

    #[test]
    fn test_tolerance_boundary() {
        let schema = SchemaBuilder::new("sales", "sale_id")
            .field(FieldBuilder::new("quantity", FieldType::Int).build())
            .field(FieldBuilder::new("unit_price", FieldType::Float).build())
            .field(FieldBuilder::new("total_amount", FieldType::Float).build())
            .rule(CrossFieldRule::ProductEquals {
                target: "total_amount".to_string(),
                multiplicand: "quantity".to_string(),
                multiplier: "unit_price".to_string(),
                tolerance: 0.01,
            })
            .build();

        let mut validator = RecordValidator::new();

        // Off by 0.009: inside tolerance
        let row = record(&[
            ("quantity", DataValue::Int(2)),
            ("unit_price", 10.0.into()),
            ("total_amount", 20.009.into()),
        ]);
        assert!(validator.validate(&schema, &row, 0).is_valid);

        // Off by 0.02: outside tolerance
        let row = record(&[
            ("quantity", DataValue::Int(2)),
            ("unit_price", 10.0.into()),
            ("total_amount", 20.02.into()),
        ]);
        let outcome = validator.validate(&schema, &row, 0);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.violations[0].kind, ViolationKind::BusinessRule);
    }

    #[test]
    fn test_optional_field_absent_is_ok() {
        let schema = SchemaBuilder::new("payments", "payment_id")
            .field(
                FieldBuilder::new("card_last_four", FieldType::Text)
                    .optional()
                    .pattern(r"^\d{4}$")
                    .build(),
            )
            .build();

        let outcome = RecordValidator::new().validate(&schema, &Record::new(), 0);
        assert!(outcome.is_valid);
    }

    #[test]
    fn test_optional_field_present_is_still_checked() {
        let schema = SchemaBuilder::new("payments", "payment_id")
            .field(
                FieldBuilder::new("card_last_four", FieldType::Text)
                    .optional()
                    .pattern(r"^\d{4}$")
                    .build(),
            )
            .build();

        let row = record(&[("card_last_four", "12a4".into())]);
        let outcome = RecordValidator::new().validate(&schema, &row, 0);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.violations[0].kind, ViolationKind::FormatError);
    }
}
