//! # Quality Core
//!
//! Core data structures and types for the E-commerce Data Quality Engine.
//!
//! This crate provides the building blocks for declaring and reporting on
//! per-entity validation: schemas with field constraints and cross-field
//! business rules, the fixed five-entity catalog (users, sellers, products,
//! sales, payments), and the violation/report types the validation engine
//! produces.
//!
//! ## Key Concepts
//!
//! - **EntitySchema**: required fields, per-field constraints, and
//!   cross-field rules for one entity type
//! - **Catalog**: the five process-wide immutable schemas, built once at
//!   startup
//! - **Violation**: a single detected deviation, tagged with kind and
//!   severity; expected bad input is a value, never an error
//! - **Reports**: per-table, cross-reference, and aggregate results, all
//!   JSON-serializable
//!
//! ## Example
//!
//! ```rust
//! use quality_core::Entity;
//!
//! let schema = Entity::Products.schema();
//! assert_eq!(schema.primary_key, "product_id");
//! ```

pub mod builder;
pub mod catalog;
pub mod error;
pub mod report;
pub mod schema;
pub mod violation;

pub use builder::*;
pub use catalog::*;
pub use error::*;
pub use report::*;
pub use schema::*;
pub use violation::*;
