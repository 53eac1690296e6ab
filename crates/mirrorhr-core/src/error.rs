//! Error types for the MirrorHR monitoring pipeline.
//!
//! This module provides error handling using [`thiserror`] for automatic
//! `Display` and `Error` trait implementations.
//!
//! # Example
//!
//! ```rust
//! use mirrorhr_core::error::{CoreError, CoreResult};
//!
//! fn open_window(capacity: usize) -> CoreResult<()> {
//!     if capacity < 2 {
//!         return Err(CoreError::invalid_capacity(capacity, 2));
//!     }
//!     Ok(())
//! }
//!
//! assert!(open_window(1).is_err());
//! ```

use thiserror::Error;

/// A specialized `Result` type for monitoring operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for the MirrorHR monitoring pipeline.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Window capacity too small for the requested statistic
    #[error("invalid window capacity {capacity}: must be at least {min}")]
    InvalidCapacity {
        /// The rejected capacity
        capacity: usize,
        /// Minimum acceptable capacity
        min: usize,
    },

    /// Non-finite sample rejected at the aggregator boundary
    #[error("invalid sample {value}: samples must be finite")]
    InvalidSample {
        /// The rejected sample value
        value: f64,
    },

    /// Operation attempted in the wrong session state
    #[error("invalid state: expected {expected}, found {actual}")]
    InvalidState {
        /// Expected state
        expected: String,
        /// Actual state
        actual: String,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },
}

impl CoreError {
    /// Creates a new invalid capacity error.
    #[must_use]
    pub fn invalid_capacity(capacity: usize, min: usize) -> Self {
        Self::InvalidCapacity { capacity, min }
    }

    /// Creates a new invalid sample error.
    #[must_use]
    pub fn invalid_sample(value: f64) -> Self {
        Self::InvalidSample { value }
    }

    /// Creates a new invalid state error.
    #[must_use]
    pub fn invalid_state(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidState {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if the caller can retry after correcting its input.
    ///
    /// A rejected sample or a wrong-state call leaves the pipeline intact;
    /// capacity and configuration errors require rebuilding the component.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidSample { .. } | Self::InvalidState { .. } => true,
            Self::InvalidCapacity { .. } | Self::Configuration { .. } => false,
        }
    }
}
