//! Heart-rate alert evaluation and relay payloads.
//!
//! [`AlertMonitor`] watches the live heart-rate stream against fixed
//! high/low thresholds and stays silent through a short warm-up so a single
//! early reading cannot fire an alert. [`AlertMessage`] is the payload
//! relayed between watch and phone; the transport itself is the platform
//! layer's concern.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use mirrorhr_core::error::{CoreError, CoreResult};
use mirrorhr_core::DeviceRole;

/// Fixed alerting thresholds.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlertThresholds {
    /// Rates above this alert as elevated (BPM).
    pub high_bpm: f64,
    /// Rates below this alert as low (BPM).
    pub low_bpm: f64,
    /// Readings to observe before any threshold alert fires.
    pub min_readings: u64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            high_bpm: 100.0,
            low_bpm: 50.0,
            min_readings: 5,
        }
    }
}

impl AlertThresholds {
    /// Check the thresholds are usable.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.high_bpm.is_finite() || !self.low_bpm.is_finite() {
            return Err(CoreError::configuration("alert thresholds must be finite"));
        }
        if self.low_bpm <= 0.0 {
            return Err(CoreError::configuration(
                "low heart-rate threshold must be positive",
            ));
        }
        if self.low_bpm >= self.high_bpm {
            return Err(CoreError::configuration(format!(
                "low threshold {} must be below high threshold {}",
                self.low_bpm, self.high_bpm
            )));
        }
        Ok(())
    }
}

/// What triggered an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlertKind {
    /// Heart rate above the high threshold.
    HighHeartRate,
    /// Heart rate below the low threshold.
    LowHeartRate,
    /// Raised by the wearer (the watch's alert button).
    Manual,
}

/// An alert relayed between devices.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlertMessage {
    /// What triggered the alert.
    pub kind: AlertKind,
    /// Originating device.
    pub source: DeviceRole,
    /// Severity in [0.0, 1.0].
    pub severity: f64,
    /// Human-readable description.
    pub message: String,
    /// When the alert was raised, seconds since the Unix epoch.
    pub timestamp_secs: f64,
}

/// Threshold watcher over the live heart-rate stream.
pub struct AlertMonitor {
    thresholds: AlertThresholds,
    reading_count: u64,
}

impl AlertMonitor {
    /// Create a monitor after validating its thresholds.
    pub fn new(thresholds: AlertThresholds) -> CoreResult<Self> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            reading_count: 0,
        })
    }

    /// Evaluate one reading; returns the alerts it raised, if any.
    ///
    /// The first `min_readings - 1` readings only warm the monitor up.
    /// Severity scales with how far the rate sits past the threshold,
    /// clamped to [0.3, 1.0] so a crossing is never reported as trivial.
    pub fn check(&mut self, bpm: f64, timestamp_secs: f64) -> Vec<AlertMessage> {
        self.reading_count += 1;
        if self.reading_count < self.thresholds.min_readings {
            return Vec::new();
        }

        let mut alerts = Vec::new();

        if bpm > self.thresholds.high_bpm {
            let severity = ((bpm - self.thresholds.high_bpm) / 80.0).clamp(0.3, 1.0);
            alerts.push(self.build(
                AlertKind::HighHeartRate,
                severity,
                format!("heart rate above threshold: {bpm:.0} BPM"),
                timestamp_secs,
            ));
        } else if bpm < self.thresholds.low_bpm {
            let severity = ((self.thresholds.low_bpm - bpm) / 30.0).clamp(0.3, 1.0);
            alerts.push(self.build(
                AlertKind::LowHeartRate,
                severity,
                format!("heart rate below threshold: {bpm:.0} BPM"),
                timestamp_secs,
            ));
        }

        for alert in &alerts {
            tracing::warn!(
                kind = ?alert.kind,
                severity = alert.severity,
                "{}",
                alert.message
            );
        }

        alerts
    }

    /// Build the wearer-triggered relay message.
    #[must_use]
    pub fn manual(&self, text: impl Into<String>, timestamp_secs: f64) -> AlertMessage {
        self.build(AlertKind::Manual, 1.0, text.into(), timestamp_secs)
    }

    fn build(
        &self,
        kind: AlertKind,
        severity: f64,
        message: String,
        timestamp_secs: f64,
    ) -> AlertMessage {
        AlertMessage {
            kind,
            source: DeviceRole::Watch,
            severity,
            message,
            timestamp_secs,
        }
    }

    /// Forget the warm-up progress, for a new session.
    pub fn reset(&mut self) {
        self.reading_count = 0;
    }

    /// Readings evaluated since construction or the last reset.
    #[must_use]
    pub fn reading_count(&self) -> u64 {
        self.reading_count
    }

    /// The configured thresholds.
    #[must_use]
    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }
}
