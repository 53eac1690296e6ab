//! Monitoring domain types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One heart-rate observation together with the variability statistic the
/// window produced for it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeartRateReading {
    /// Instantaneous heart rate in beats per minute.
    pub bpm: f64,
    /// SDNN over the current window; `None` while the window is warming up.
    pub hrv_sdnn: Option<f64>,
    /// Observation time, seconds since the Unix epoch.
    pub timestamp_secs: f64,
}

impl HeartRateReading {
    /// Whether the variability window had filled when this reading was
    /// taken.
    #[must_use]
    pub fn has_hrv(&self) -> bool {
        self.hrv_sdnn.is_some()
    }
}
