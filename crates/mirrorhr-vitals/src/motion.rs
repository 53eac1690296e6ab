//! Smoothed motion intensity from 3-axis acceleration.
//!
//! Each device-motion sample is collapsed to one scalar -- the mean
//! absolute value of the three axes, rounded to two decimals -- and fed
//! into a [`RingAverage`] reduced by [`Mean`]. The default 250-slot window
//! smooths about five seconds of the 50 Hz accelerometer feed.

use mirrorhr_core::error::{CoreError, CoreResult};
use mirrorhr_core::DEFAULT_MOTION_WINDOW;

use crate::ring::{Mean, RingAverage};

/// Round to two decimal places, half away from zero.
///
/// Multiply-by-100 / round / divide-by-100, the same rule the device-side
/// display applies before logging a motion value.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Per-sample scalar: mean absolute acceleration across the axes, rounded
/// to two decimals.
fn magnitude(x: f64, y: f64, z: f64) -> f64 {
    round2((x.abs() + y.abs() + z.abs()) / 3.0)
}

/// Smoothed motion-level aggregator.
pub struct Motion {
    window: RingAverage<Mean>,
}

impl Motion {
    /// Create an aggregator over a `capacity`-sample window.
    pub fn new(capacity: usize) -> CoreResult<Self> {
        Ok(Self {
            window: RingAverage::new(capacity, Mean)?,
        })
    }

    /// Push one 3-axis acceleration sample and return the smoothed motion
    /// level, or the warm-up sentinel while the window is still filling.
    ///
    /// Any non-finite component is rejected with
    /// [`CoreError::InvalidSample`]; units are the caller's concern.
    pub fn add_sample(&mut self, x: f64, y: f64, z: f64) -> CoreResult<f64> {
        for component in [x, y, z] {
            if !component.is_finite() {
                return Err(CoreError::invalid_sample(component));
            }
        }
        Ok(self.window.add_sample(magnitude(x, y, z)))
    }

    /// The current smoothed level, or `None` until the window has filled.
    #[must_use]
    pub fn level(&self) -> Option<f64> {
        self.window.statistic()
    }

    /// Discard all samples and start a fresh window.
    pub fn reset(&mut self) {
        self.window.reset();
    }

    /// Window capacity in samples.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }
}

impl Default for Motion {
    /// The standard 250-sample (~5 s) window.
    fn default() -> Self {
        Self::new(DEFAULT_MOTION_WINDOW).expect("default motion window capacity is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirrorhr_core::WARMUP_SENTINEL;

    #[test]
    fn default_window_is_250() {
        let motion = Motion::default();
        assert_eq!(motion.capacity(), 250);
    }

    #[test]
    fn pre_transform_rounds_to_two_decimals() {
        // (|3| + |-4| + |0|) / 3 = 2.333... -> 2.33
        assert!((magnitude(3.0, -4.0, 0.0) - 2.33).abs() < 1e-12);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // (0.375 + 0 + 0) / 3 = 0.125; x100 = 12.5 rounds up to 13, not
        // down to the even 12.
        assert!((magnitude(0.375, 0.0, 0.0) - 0.13).abs() < 1e-12);
        // Sign of the components never matters: magnitudes are absolute.
        assert!((magnitude(-0.375, 0.0, 0.0) - 0.13).abs() < 1e-12);
    }

    #[test]
    fn smoothed_level_is_the_window_mean() {
        let mut motion = Motion::new(2).unwrap();
        assert_eq!(motion.add_sample(3.0, -4.0, 0.0).unwrap(), WARMUP_SENTINEL);
        // Second sample wraps the window: mean of 2.33 and 1.0
        let level = motion.add_sample(1.0, 1.0, 1.0).unwrap();
        assert!((level - (2.33 + 1.0) / 2.0).abs() < 1e-9);
        assert_eq!(motion.level(), Some(level));
    }

    #[test]
    fn stillness_smooths_to_zero() {
        let mut motion = Motion::new(3).unwrap();
        let mut last = WARMUP_SENTINEL;
        for _ in 0..4 {
            last = motion.add_sample(0.001, -0.002, 0.001).unwrap();
        }
        // Each sample rounds to 0.00
        assert!(last.abs() < 1e-12);
    }

    #[test]
    fn non_finite_components_are_rejected() {
        let mut motion = Motion::new(2).unwrap();
        assert!(motion.add_sample(f64::NAN, 0.0, 0.0).is_err());
        assert!(motion.add_sample(0.0, f64::INFINITY, 0.0).is_err());
        assert!(motion.add_sample(0.0, 0.0, f64::NEG_INFINITY).is_err());
        assert!(motion.level().is_none());
    }

    #[test]
    fn reset_restarts_the_warmup() {
        let mut motion = Motion::new(2).unwrap();
        motion.add_sample(1.0, 1.0, 1.0).unwrap();
        motion.add_sample(1.0, 1.0, 1.0).unwrap();
        assert!(motion.level().is_some());
        motion.reset();
        assert!(motion.level().is_none());
        assert_eq!(motion.add_sample(1.0, 1.0, 1.0).unwrap(), WARMUP_SENTINEL);
    }
}
