//! Heart-rate variability over a sliding window.
//!
//! [`Hrv`] feeds instantaneous heart-rate readings (beats per minute,
//! already unit-converted by the caller) into a [`RingAverage`] reduced by
//! [`Sdnn`] -- the sample standard deviation of the windowed rates, the
//! SDNN variability metric. The default 50-slot window matches the rate at
//! which the health store delivers readings.

use mirrorhr_core::error::{CoreError, CoreResult};
use mirrorhr_core::DEFAULT_HRV_WINDOW;

use crate::ring::{RingAverage, Sdnn};

/// SDNN heart-rate-variability aggregator.
pub struct Hrv {
    window: RingAverage<Sdnn>,
}

impl Hrv {
    /// Create an aggregator over a `capacity`-sample window.
    ///
    /// Fails with [`CoreError::InvalidCapacity`] for capacities below two,
    /// where the SDNN divisor `n - 1` would reach zero.
    pub fn new(capacity: usize) -> CoreResult<Self> {
        Ok(Self {
            window: RingAverage::new(capacity, Sdnn)?,
        })
    }

    /// Push one heart-rate reading and return the current SDNN, or the
    /// warm-up sentinel while the window is still filling.
    ///
    /// Non-finite readings are rejected with [`CoreError::InvalidSample`]
    /// before they can poison the window.
    pub fn add_sample(&mut self, bpm: f64) -> CoreResult<f64> {
        if !bpm.is_finite() {
            return Err(CoreError::invalid_sample(bpm));
        }
        Ok(self.window.add_sample(bpm))
    }

    /// The current SDNN, or `None` until the window has filled once.
    #[must_use]
    pub fn sdnn(&self) -> Option<f64> {
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

    /// Whether the window has not yet produced a statistic.
    #[must_use]
    pub fn is_warming_up(&self) -> bool {
        !self.window.is_full()
    }
}

impl Default for Hrv {
    /// The standard 50-sample window.
    fn default() -> Self {
        Self::new(DEFAULT_HRV_WINDOW).expect("default HRV window capacity is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirrorhr_core::WARMUP_SENTINEL;

    #[test]
    fn default_window_is_50() {
        let hrv = Hrv::default();
        assert_eq!(hrv.capacity(), 50);
        assert!(hrv.is_warming_up());
    }

    #[test]
    fn sentinel_prefix_then_sdnn() {
        let mut hrv = Hrv::new(4).unwrap();
        for bpm in [70.0, 72.0, 68.0] {
            assert_eq!(hrv.add_sample(bpm).unwrap(), WARMUP_SENTINEL);
            assert!(hrv.sdnn().is_none());
        }
        let sdnn = hrv.add_sample(74.0).unwrap();
        let expected = (20.0_f64 / 3.0).sqrt(); // ~2.582
        assert!((sdnn - expected).abs() < 1e-9);
        assert_eq!(hrv.sdnn(), Some(sdnn));
    }

    #[test]
    fn constant_rate_has_zero_variability() {
        let mut hrv = Hrv::new(3).unwrap();
        let mut last = WARMUP_SENTINEL;
        for _ in 0..5 {
            last = hrv.add_sample(60.0).unwrap();
        }
        assert!(last.abs() < 1e-12);
    }

    #[test]
    fn non_finite_rates_are_rejected() {
        let mut hrv = Hrv::new(3).unwrap();
        assert!(matches!(
            hrv.add_sample(f64::NAN),
            Err(CoreError::InvalidSample { .. })
        ));
        assert!(hrv.add_sample(f64::INFINITY).is_err());
        assert!(hrv.add_sample(f64::NEG_INFINITY).is_err());
        // The rejected samples never entered the window.
        assert!(hrv.is_warming_up());
        for bpm in [70.0, 71.0, 72.0] {
            hrv.add_sample(bpm).unwrap();
        }
        assert!(hrv.sdnn().unwrap().is_finite());
    }

    #[test]
    fn reset_restarts_the_warmup() {
        let mut hrv = Hrv::new(2).unwrap();
        hrv.add_sample(70.0).unwrap();
        hrv.add_sample(80.0).unwrap();
        assert!(hrv.sdnn().is_some());
        hrv.reset();
        assert!(hrv.is_warming_up());
        assert_eq!(hrv.add_sample(70.0).unwrap(), WARMUP_SENTINEL);
    }

    #[test]
    fn invalid_capacity_is_a_construction_error() {
        assert!(Hrv::new(0).is_err());
        assert!(Hrv::new(1).is_err());
        assert!(Hrv::new(2).is_ok());
    }
}
