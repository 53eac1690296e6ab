//! # MirrorHR Core
//!
//! Core types, errors, and traits for the MirrorHR heart-rate monitoring
//! pipeline.
//!
//! This crate provides the foundational building blocks used throughout the
//! MirrorHR workspace:
//!
//! - **Error Types**: [`CoreError`] and [`CoreResult`] via the [`error`]
//!   module.
//! - **Traits**: [`WindowReduce`], the pluggable-reduction contract the
//!   ring aggregator is parameterized over.
//! - **Types**: [`DeviceRole`] for cross-device payloads.
//! - **Constants**: default window sizes and the warm-up sentinel shared by
//!   the aggregators and their presentation-side consumers.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization via serde
//!
//! ## Example
//!
//! ```rust
//! use mirrorhr_core::traits::WindowReduce;
//!
//! let mean = |w: &[f64]| w.iter().sum::<f64>() / w.len() as f64;
//! assert!((mean.reduce(&[1.0, 2.0, 3.0]) - 2.0).abs() < f64::EPSILON);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{CoreError, CoreResult};
pub use traits::WindowReduce;
pub use types::DeviceRole;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Return value of a sample push while the window has not yet filled once.
///
/// Display layers recognize this value and show a placeholder instead of a
/// statistic. Both the mean and SDNN of physiological inputs are
/// non-negative, so the sentinel never collides with a real result.
pub const WARMUP_SENTINEL: f64 = -1.0;

/// Smallest window capacity any aggregator accepts.
///
/// Two samples is the floor for the SDNN's `n - 1` divisor; it is applied
/// uniformly so every window behaves the same at the API boundary.
pub const MIN_WINDOW_CAPACITY: usize = 2;

/// Default heart-rate-variability window (samples).
pub const DEFAULT_HRV_WINDOW: usize = 50;

/// Default motion smoothing window (samples), about five seconds at the
/// 50 Hz device-motion feed.
pub const DEFAULT_MOTION_WINDOW: usize = 250;

/// Device-motion sampling rate the default motion window is sized for (Hz).
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 50.0;

/// Prelude module for convenient imports.
///
/// ```rust
/// use mirrorhr_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::traits::WindowReduce;
    pub use crate::types::DeviceRole;
    pub use crate::{
        DEFAULT_HRV_WINDOW, DEFAULT_MOTION_WINDOW, MIN_WINDOW_CAPACITY, WARMUP_SENTINEL,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_valid() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn constants() {
        assert_eq!(MIN_WINDOW_CAPACITY, 2);
        assert!(DEFAULT_HRV_WINDOW >= MIN_WINDOW_CAPACITY);
        assert!(DEFAULT_MOTION_WINDOW >= MIN_WINDOW_CAPACITY);
        assert!(WARMUP_SENTINEL < 0.0);
        assert!(
            (DEFAULT_MOTION_WINDOW as f64 / DEFAULT_SAMPLE_RATE_HZ - 5.0).abs() < f64::EPSILON
        );
    }
}
