// ============================================================================
// av1transcoder-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Configuration Model
//
// This module defines the error types raised while building validated values
// and while preparing the raw argument list.
//
// KEY COMPONENTS:
// - ValidationError: A token or number that violates a value's domain
// - CoreError: Top-level error type for the library
// - CoreResult: Result alias used throughout the crates

use std::path::PathBuf;

use thiserror::Error;

/// Raised when a value does not satisfy the domain of a constrained type.
///
/// Both variants carry a short description of the expected domain so the
/// message identifies what was wrong without further context.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A well-formed number outside the allowed range.
    #[error("Invalid number. Expected {expected}. Got {value}.")]
    OutOfRange { expected: &'static str, value: String },

    /// A token that could not be read as the expected kind of value at all.
    #[error("Invalid value '{token}'. Expected {expected}.")]
    Malformed { expected: &'static str, token: String },

    /// A well-formed integer too large to be stored.
    #[error("Invalid number. {value} exceeds the largest supported value {limit}.")]
    Unrepresentable { limit: u64, value: String },
}

impl ValidationError {
    /// Returns true for out-of-range failures.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

/// Custom error types for av1transcoder.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Argument file '{}': {message}", .path.display())]
    ArgumentFile { path: PathBuf, message: String },

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for av1transcoder operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
