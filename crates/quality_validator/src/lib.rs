//! # Quality Validator
//!
//! Validation engine for synthetic e-commerce tabular data. This crate
//! provides the validation logic for checking in-memory tables against the
//! fixed entity catalog, including:
//!
//! - Constraint evaluation (patterns, ranges, lengths, enums, injection
//!   denylist)
//! - Record validation (presence, nullability, type, cross-field business
//!   rules)
//! - Table validation (quality score, duplicate keys, null statistics)
//! - Cross-table referential-integrity checking
//!
//! ## Example
//!
//! ```rust
//! use quality_validator::{DataValue, QualityEngine, Record, Table};
//!
//! let mut row = Record::new();
//! row.insert("user_id".to_string(), DataValue::String("U000001".into()));
//!
//! let mut engine = QualityEngine::new();
//! let report = engine
//!     .validate_table("users", &Table::from_rows(vec![row]))
//!     .unwrap();
//!
//! // The record is missing most required fields; the report says which.
//! assert_eq!(report.invalid_records, 1);
//! ```

mod constraints;
mod cross_reference;
mod dataset;
mod engine;
mod record;
mod table;

pub use constraints::*;
pub use cross_reference::*;
pub use dataset::*;
pub use engine::*;
pub use record::*;
pub use table::*;
