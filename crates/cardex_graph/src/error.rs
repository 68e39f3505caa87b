//! Error types for graph analyses.

use thiserror::Error;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while analysing a record subset.
#[derive(Debug, Error)]
pub enum GraphError {
    /// An expiry field could not be parsed as `MM/YY`.
    #[error("invalid expiry period: {value:?} (expected MM/YY)")]
    InvalidExpiry {
        /// The offending field value.
        value: String,
    },
}

impl GraphError {
    /// Creates an invalid-expiry error.
    pub fn invalid_expiry(value: impl Into<String>) -> Self {
        Self::InvalidExpiry {
            value: value.into(),
        }
    }
}
