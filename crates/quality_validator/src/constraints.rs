//! Constraint evaluation logic.
//!
//! This module evaluates single-field constraints against values:
//! - Pattern: string must fully match a regex
//! - Range / Positive / NonNegative: numeric bounds
//! - Length: character count bounds
//! - EnumOf: membership in an allowed set
//! - Numeric: number or number-parseable string
//! - NoInjection: denylist for markup/script injection in free text
//!
//! Constraints never fail with an error for expected bad input; every
//! failure is reported as a [`Violation`] value.

use std::collections::HashMap;

use quality_core::{Constraint, Violation};
use regex::Regex;

use crate::dataset::DataValue;

/// Evaluates field constraints, caching compiled regex patterns.
#[derive(Debug, Default)]
pub struct ConstraintChecker {
    /// Cache of compiled regex patterns
    regex_cache: HashMap<String, Regex>,
}

impl ConstraintChecker {
    /// Creates a new constraint checker.
    pub fn new() -> Self {
        Self {
            regex_cache: HashMap::new(),
        }
    }

    /// Evaluates a single constraint against a field value.
    ///
    /// Returns `None` on pass, or the violation describing the failure.
    /// Null values are skipped here; requiredness is the record validator's
    /// responsibility.
    pub fn check(
        &mut self,
        field: &str,
        constraint: &Constraint,
        value: &DataValue,
    ) -> Option<Violation> {
        if value.is_null() {
            return None;
        }

        match constraint {
            Constraint::Pattern { regex } => self.check_pattern(field, value, regex),
            Constraint::Range { min, max } => check_range(field, value, *min, *max),
            Constraint::Positive => check_sign(field, value, true),
            Constraint::NonNegative => check_sign(field, value, false),
            Constraint::Length { min, max } => check_length(field, value, *min, *max),
            Constraint::EnumOf { values } => check_enum(field, value, values),
            Constraint::Numeric => check_numeric(field, value),
            Constraint::NoInjection => check_no_injection(field, value),
        }
    }

    /// Validates that a string value matches a regex pattern.
    fn check_pattern(&mut self, field: &str, value: &DataValue, pattern: &str) -> Option<Violation> {
        let Some(text) = value.as_str() else {
            return Some(Violation::format_error(
                field,
                format!(
                    "Pattern constraint requires a string, found {}",
                    value.type_name()
                ),
            ));
        };

        let regex = match self.get_or_compile_regex(pattern) {
            Ok(r) => r,
            Err(e) => {
                return Some(Violation::format_error(
                    field,
                    format!("Invalid pattern '{pattern}': {e}"),
                ));
            }
        };

        if !regex.is_match(text) {
            return Some(Violation::format_error(
                field,
                format!("Value '{text}' does not match pattern '{pattern}'"),
            ));
        }

        None
    }

    /// Gets a compiled regex from cache or compiles and caches it.
    fn get_or_compile_regex(&mut self, pattern: &str) -> Result<&Regex, String> {
        if !self.regex_cache.contains_key(pattern) {
            let regex = Regex::new(pattern).map_err(|e| e.to_string())?;
            self.regex_cache.insert(pattern.to_string(), regex);
        }
        Ok(&self.regex_cache[pattern])
    }
}

/// Validates that a numeric value is within an inclusive range.
fn check_range(field: &str, value: &DataValue, min: f64, max: f64) -> Option<Violation> {
    let number = match value.as_float() {
        Some(n) => n,
        None => {
            return Some(Violation::format_error(
                field,
                format!(
                    "Range constraint requires a number, found {}",
                    value.type_name()
                ),
            ));
        }
    };

    if number < min || number > max {
        return Some(Violation::format_error(
            field,
            format!("Value {number} outside range [{min}, {max}]"),
        ));
    }

    None
}

/// Validates a sign constraint: strictly positive or non-negative.
fn check_sign(field: &str, value: &DataValue, strict: bool) -> Option<Violation> {
    let number = match value.as_float() {
        Some(n) => n,
        None => {
            return Some(Violation::format_error(
                field,
                format!(
                    "Numeric constraint requires a number, found {}",
                    value.type_name()
                ),
            ));
        }
    };

    if strict && number <= 0.0 {
        return Some(Violation::format_error(
            field,
            format!("Value {number} must be positive"),
        ));
    }
    if !strict && number < 0.0 {
        return Some(Violation::format_error(
            field,
            format!("Value {number} must be non-negative"),
        ));
    }

    None
}

/// Validates string length in characters, not bytes.
fn check_length(field: &str, value: &DataValue, min: usize, max: usize) -> Option<Violation> {
    let Some(text) = value.as_str() else {
        return Some(Violation::format_error(
            field,
            format!(
                "Length constraint requires a string, found {}",
                value.type_name()
            ),
        ));
    };

    let length = text.chars().count();
    if length < min || length > max {
        return Some(Violation::format_error(
            field,
            format!("Length {length} outside bounds [{min}, {max}]"),
        ));
    }

    None
}

/// Validates membership in an allowed-values set.
fn check_enum(field: &str, value: &DataValue, allowed: &[String]) -> Option<Violation> {
    let candidate = value.to_string();
    if !allowed.iter().any(|a| *a == candidate) {
        return Some(Violation::format_error(
            field,
            format!(
                "Value '{}' not in allowed values: [{}]",
                candidate,
                allowed.join(", ")
            ),
        ));
    }

    None
}

/// Validates that a value is a number or a number-parseable string.
fn check_numeric(field: &str, value: &DataValue) -> Option<Violation> {
    if value.as_number().is_none() {
        return Some(Violation::format_error(
            field,
            format!("Value '{value}' must be numeric"),
        ));
    }

    None
}

/// Rejects text containing `<script>` or `javascript:`, case-insensitively.
///
/// A substring denylist, not HTML sanitization; non-string values have
/// nothing to scan and pass.
fn check_no_injection(field: &str, value: &DataValue) -> Option<Violation> {
    let Some(text) = value.as_str() else {
        return None;
    };

    let lowered = text.to_lowercase();
    if lowered.contains("<script>") || lowered.contains("javascript:") {
        return Some(Violation::format_error(
            field,
            format!("Markup injection detected in field '{field}'"),
        ));
    }

    None
}
