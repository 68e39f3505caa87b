//! Error types for the card store.
//!
//! A key that is simply absent is not an error: lookups return `Option`
//! and deletions return `bool`. Extracting from an empty priority index
//! or undoing with an empty history are recoverable no-ops. The only
//! genuinely reportable conditions are below, and none of them is fatal
//! to the store.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The open-addressing table had no free slot left during insert.
    ///
    /// The record stays in the canonical sequence and every other index;
    /// it is merely absent from this one table until a rebuild finds room.
    #[error("open-addressing table full (capacity {capacity}), pin {pin} not indexed")]
    CapacityExhausted {
        /// PIN that could not be placed.
        pin: i64,
        /// Fixed table capacity.
        capacity: usize,
    },

    /// A configuration value was rejected.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the rejected value.
        message: String,
    },
}

impl StoreError {
    /// Creates a capacity-exhausted error.
    pub fn capacity_exhausted(pin: i64, capacity: usize) -> Self {
        Self::CapacityExhausted { pin, capacity }
    }

    /// Creates an invalid-configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
