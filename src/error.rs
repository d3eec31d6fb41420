//! # Centralized Error Handling
//!
//! Unified error types for the entire crate using `thiserror`.
//!
//! All shape and argument validation happens on the calling thread before any
//! task is submitted to the worker pool, so an `Err` always means zero
//! partial work was performed.

use thiserror::Error;

/// Main error type for parvec operations
#[derive(Error, Debug)]
pub enum ParvecError {
    /// Operations with no defined result on the given input
    /// (min/max over zero elements, negative tolerance, zero worker count)
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Two buffers required to match in length/shape do not
    /// (binary map, inner product, equality test, matrix-multiply inner dimension)
    #[error("dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    /// Execution-context construction failures (worker pool could not be built)
    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Type alias for Results using ParvecError
pub type Result<T> = std::result::Result<T, ParvecError>;

impl ParvecError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(message: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
