//! Error types for semdb
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::Key;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for semdb operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Precondition Violations
    // -------------------------------------------------------------------------
    #[error("Invalid {what} capacity: {requested}")]
    InvalidCapacity { what: &'static str, requested: usize },

    #[error("Length mismatch: handle covers {expected} bytes, buffer has {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Handle {address}+{length} lies outside the {capacity} byte pool")]
    OutOfBounds {
        address: usize,
        length: usize,
        capacity: usize,
    },

    // -------------------------------------------------------------------------
    // Logical Rejections
    // -------------------------------------------------------------------------
    #[error("Duplicate key: {0}")]
    DuplicateKey(Key),

    #[error("Key not found: {0}")]
    KeyNotFound(Key),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Command Stream Errors
    // -------------------------------------------------------------------------
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}
