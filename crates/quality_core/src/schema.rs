//! Entity schema types and structures.
//!
//! This module contains the core types for declaring per-entity validation
//! schemas, including field definitions, constraint variants, and cross-field
//! business rules.

use serde::{Deserialize, Serialize};

/// A validation schema for one entity type (users, products, ...).
///
/// An `EntitySchema` declares the fields a record of this entity must carry,
/// the constraints each field value must satisfy, and the cross-field business
/// rules spanning multiple fields of the same record. Schemas are constructed
/// once at startup and shared read-only across all validation calls.
///
/// # Example
///
/// ```rust
/// use quality_core::{EntitySchema, FieldDef, FieldType};
///
/// let schema = EntitySchema {
///     name: "users".to_string(),
///     primary_key: "user_id".to_string(),
///     fields: vec![FieldDef {
///         name: "user_id".to_string(),
///         field_type: FieldType::Text,
///         required: true,
///         constraints: vec![],
///     }],
///     rules: vec![],
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Entity name identifying this schema (e.g., "users")
    pub name: String,

    /// Primary-key field used for duplicate detection and cross references
    pub primary_key: String,

    /// Ordered list of field definitions
    pub fields: Vec<FieldDef>,

    /// Cross-field business rules evaluated after per-field checks
    pub rules: Vec<CrossFieldRule>,
}

impl EntitySchema {
    /// Looks up a field definition by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Expected value type for a field.
///
/// Drives the type check that runs before any constraint evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string value
    Text,
    /// 64-bit integer value
    Int,
    /// 64-bit float value (integers coerce)
    Float,
    /// Boolean value
    Bool,
    /// Calendar date (a date value or an ISO-8601 string)
    Date,
    /// Any type; skips the type check
    Any,
}

impl FieldType {
    /// Returns the lowercase type label used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Int => "integer",
            FieldType::Float => "float",
            FieldType::Bool => "boolean",
            FieldType::Date => "date",
            FieldType::Any => "any",
        }
    }
}

/// A single field definition in an entity schema.
///
/// Represents a column in the tabular data with its expected type,
/// requiredness, and value constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name
    pub name: String,

    /// Expected value type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether the field must be present and non-null
    pub required: bool,

    /// Constraints the field value must satisfy
    pub constraints: Vec<Constraint>,
}

/// Validation constraints that can be applied to a single field value.
///
/// Constraints never abort validation: each evaluates to pass or to a
/// violation describing the failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
    /// String value must fully match the regex pattern (no partial matches)
    Pattern {
        /// Regular expression pattern
        regex: String,
    },

    /// Numeric value must be within the inclusive range
    Range {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Numeric value must be strictly greater than zero
    Positive,

    /// Numeric value must be greater than or equal to zero
    NonNegative,

    /// String length in characters must be within the inclusive bounds
    Length {
        /// Minimum length (inclusive)
        min: usize,
        /// Maximum length (inclusive)
        max: usize,
    },

    /// Value must be one of the allowed values
    EnumOf {
        /// List of valid values
        values: Vec<String>,
    },

    /// Value must be a number, or a string parseable as a number
    Numeric,

    /// Text must not contain `<script>` or `javascript:` (case-insensitive).
    ///
    /// A blunt substring denylist against markup injection in free-text
    /// fields. This is a known limitation, not full HTML sanitization, and
    /// must not be read as a security guarantee.
    NoInjection,
}

/// A business rule spanning two or more fields of the same record.
///
/// Rules are declarative data interpreted by the validator. Each rule names
/// the fields it reads so the validator can skip it when a referenced field
/// already failed its own checks, avoiding cascading spurious errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CrossFieldRule {
    /// `field` must be strictly greater than `than` (equality fails)
    StrictlyGreater {
        /// Field holding the larger value
        field: String,
        /// Field holding the smaller value
        than: String,
    },

    /// `target` must equal `multiplicand * multiplier` within `tolerance`
    ProductEquals {
        /// Field holding the expected product
        target: String,
        /// First factor field
        multiplicand: String,
        /// Second factor field
        multiplier: String,
        /// Absolute tolerance for the equality check
        tolerance: f64,
    },

    /// `target` must equal `base * (1 - discount)` within `tolerance`
    DiscountedEquals {
        /// Field holding the expected discounted value
        target: String,
        /// Field holding the undiscounted base value
        base: String,
        /// Field holding the discount fraction in [0, 1]
        discount: String,
        /// Absolute tolerance for the equality check
        tolerance: f64,
    },
}

impl CrossFieldRule {
    /// Returns the names of the fields this rule reads.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            CrossFieldRule::StrictlyGreater { field, than } => {
                vec![field.as_str(), than.as_str()]
            }
            CrossFieldRule::ProductEquals {
                target,
                multiplicand,
                multiplier,
                ..
            } => vec![target.as_str(), multiplicand.as_str(), multiplier.as_str()],
            CrossFieldRule::DiscountedEquals {
                target,
                base,
                discount,
                ..
            } => vec![target.as_str(), base.as_str(), discount.as_str()],
        }
    }
}
