//! Builder pattern for declaring entity schemas.
//!
//! This module provides ergonomic builders for constructing schemas
//! and their fields with a fluent API.

use crate::{Constraint, CrossFieldRule, EntitySchema, FieldDef, FieldType};

/// Builder for creating an `EntitySchema`.
///
/// # Example
///
/// ```rust
/// use quality_core::{Constraint, FieldBuilder, FieldType, SchemaBuilder};
///
/// let schema = SchemaBuilder::new("users", "user_id")
///     .field(
///         FieldBuilder::new("user_id", FieldType::Text)
///             .constraint(Constraint::Pattern {
///                 regex: r"^U\d{6}$".to_string(),
///             })
///             .build(),
///     )
///     .build();
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    primary_key: String,
    fields: Vec<FieldDef>,
    rules: Vec<CrossFieldRule>,
}

impl SchemaBuilder {
    /// Creates a new schema builder.
    ///
    /// # Arguments
    ///
    /// * `name` - Entity name (e.g., "users")
    /// * `primary_key` - Primary-key field name
    pub fn new(name: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: primary_key.into(),
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Adds a field to the schema.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a cross-field rule to the schema.
    pub fn rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Builds the schema.
    pub fn build(self) -> EntitySchema {
        EntitySchema {
            name: self.name,
            primary_key: self.primary_key,
            fields: self.fields,
            rules: self.rules,
        }
    }
}

/// Builder for creating a `FieldDef`.
///
/// Fields are required by default; call [`FieldBuilder::optional`] for
/// fields that may be absent or null.
#[derive(Debug)]
pub struct FieldBuilder {
    name: String,
    field_type: FieldType,
    required: bool,
    constraints: Vec<Constraint>,
}

impl FieldBuilder {
    /// Creates a new field builder.
    ///
    /// # Arguments
    ///
    /// * `name` - Field name
    /// * `field_type` - Expected value type
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            constraints: Vec::new(),
        }
    }

    /// Marks the field as optional (may be absent or null).
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Adds a constraint to the field.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds a full-match pattern constraint.
    pub fn pattern(self, regex: impl Into<String>) -> Self {
        self.constraint(Constraint::Pattern {
            regex: regex.into(),
        })
    }

    /// Adds an inclusive character-length constraint.
    pub fn length(self, min: usize, max: usize) -> Self {
        self.constraint(Constraint::Length { min, max })
    }

    /// Adds an inclusive numeric range constraint.
    pub fn range(self, min: f64, max: f64) -> Self {
        self.constraint(Constraint::Range { min, max })
    }

    /// Adds an allowed-values constraint.
    pub fn enum_of<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraint(Constraint::EnumOf {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Adds the injection denylist constraint for free-text fields.
    pub fn no_injection(self) -> Self {
        self.constraint(Constraint::NoInjection)
    }

    /// Builds the field.
    pub fn build(self) -> FieldDef {
        FieldDef {
            name: self.name,
            field_type: self.field_type,
            required: self.required,
            constraints: self.constraints,
        }
    }
}
