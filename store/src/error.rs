//! Error types for store operations.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failure modes surfaced by the relational store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint was violated.
    ///
    /// Carries the wire names of the offending columns so the mutation
    /// actions can produce per-field errors.
    #[error("unique constraint violated: {}", fields.join(", "))]
    UniqueViolation {
        /// Conflicting field names, wire (camelCase) spelling.
        fields: Vec<String>,
    },

    /// The targeted row does not exist.
    #[error("record not found")]
    NotFound,

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(String),
}
