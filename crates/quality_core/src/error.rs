//! Error types for the quality engine.
//!
//! Per-record validation failures are never errors; they are captured as
//! [`crate::Violation`] values. This module covers the hard failures only:
//! programmer error (unknown entity name) and report export failures.

use thiserror::Error;

/// Result type for quality engine operations.
pub type Result<T> = std::result::Result<T, QualityError>;

/// Hard failures signalled to the caller.
#[derive(Error, Debug)]
pub enum QualityError {
    /// Caller asked to validate an entity the catalog does not know.
    ///
    /// This indicates a misconfigured call site, not bad data, and is
    /// deliberately fail-fast rather than recovered into a violation.
    #[error("Unknown entity type: '{0}'. Must be one of: users, sellers, products, sales, payments")]
    UnknownEntity(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during report export or data loading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
