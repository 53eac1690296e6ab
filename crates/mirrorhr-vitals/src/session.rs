//! Monitoring session lifecycle.
//!
//! [`MonitorSession`] wires the windowed aggregators, the history store,
//! and the alert monitor into the start/feed/stop cycle the watch app
//! drives: starting a session resets every window before the first sample,
//! stopping returns to idle, and the history store persists across
//! sessions the way the platform health store does.
//!
//! The session is a plain single-producer value: callers deliver samples
//! in arrival order and add their own lock if they share one instance
//! across threads.

use std::fmt;

use mirrorhr_core::error::{CoreError, CoreResult};
use mirrorhr_core::{DEFAULT_HRV_WINDOW, DEFAULT_MOTION_WINDOW, MIN_WINDOW_CAPACITY};

use crate::alerts::{AlertMessage, AlertMonitor, AlertThresholds};
use crate::hrv::Hrv;
use crate::motion::Motion;
use crate::store::HeartRateStore;
use crate::types::HeartRateReading;

/// Configuration for a monitoring session.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// HRV window capacity (samples).
    pub hrv_window: usize,
    /// Motion smoothing window capacity (samples).
    pub motion_window: usize,
    /// History store retention (readings).
    pub store_capacity: usize,
    /// Heart-rate alerting thresholds.
    pub thresholds: AlertThresholds,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hrv_window: DEFAULT_HRV_WINDOW,
            motion_window: DEFAULT_MOTION_WINDOW,
            store_capacity: 3600, // an hour at 1 Hz
            thresholds: AlertThresholds::default(),
        }
    }
}

impl SessionConfig {
    /// Check the configuration is usable.
    pub fn validate(&self) -> CoreResult<()> {
        if self.hrv_window < MIN_WINDOW_CAPACITY {
            return Err(CoreError::invalid_capacity(
                self.hrv_window,
                MIN_WINDOW_CAPACITY,
            ));
        }
        if self.motion_window < MIN_WINDOW_CAPACITY {
            return Err(CoreError::invalid_capacity(
                self.motion_window,
                MIN_WINDOW_CAPACITY,
            ));
        }
        if self.store_capacity == 0 {
            return Err(CoreError::configuration(
                "history store capacity must be at least 1",
            ));
        }
        self.thresholds.validate()
    }
}

/// Whether a session is currently accepting samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session in progress; samples are rejected.
    Idle,
    /// Session in progress; samples feed the aggregators.
    Running,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
        }
    }
}

/// One monitoring pipeline: aggregators, history, and alerting behind a
/// start/feed/stop lifecycle.
pub struct MonitorSession {
    config: SessionConfig,
    state: SessionState,
    hrv: Hrv,
    motion: Motion,
    store: HeartRateStore,
    alerts: AlertMonitor,
    pending_alerts: Vec<AlertMessage>,
}

impl MonitorSession {
    /// Build an idle session from a validated configuration.
    pub fn new(config: SessionConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            hrv: Hrv::new(config.hrv_window)?,
            motion: Motion::new(config.motion_window)?,
            store: HeartRateStore::new(config.store_capacity),
            alerts: AlertMonitor::new(config.thresholds.clone())?,
            state: SessionState::Idle,
            pending_alerts: Vec::new(),
            config,
        })
    }

    /// Start a session: every window and the alert warm-up reset before
    /// the first sample. History is retained.
    ///
    /// Fails with [`CoreError::InvalidState`] if a session is already
    /// running.
    pub fn start(&mut self) -> CoreResult<()> {
        self.ensure_state(SessionState::Idle)?;
        self.hrv.reset();
        self.motion.reset();
        self.alerts.reset();
        self.pending_alerts.clear();
        self.state = SessionState::Running;
        tracing::info!(
            hrv_window = self.hrv.capacity(),
            motion_window = self.motion.capacity(),
            "monitoring session started"
        );
        Ok(())
    }

    /// Stop the running session. The history store keeps its readings.
    pub fn stop(&mut self) -> CoreResult<()> {
        self.ensure_state(SessionState::Running)?;
        self.state = SessionState::Idle;
        tracing::info!(
            stored_readings = self.store.len(),
            "monitoring session stopped"
        );
        Ok(())
    }

    /// Feed one heart-rate observation.
    ///
    /// Returns the reading that was recorded, with `hrv_sdnn` populated
    /// once the variability window has filled. Alerts raised by this
    /// reading queue up for [`take_alerts`](Self::take_alerts).
    pub fn push_heart_rate(
        &mut self,
        bpm: f64,
        timestamp_secs: f64,
    ) -> CoreResult<HeartRateReading> {
        self.ensure_state(SessionState::Running)?;
        self.hrv.add_sample(bpm)?;

        let reading = HeartRateReading {
            bpm,
            hrv_sdnn: self.hrv.sdnn(),
            timestamp_secs,
        };
        self.store.push(reading.clone());
        self.pending_alerts
            .extend(self.alerts.check(bpm, timestamp_secs));
        Ok(reading)
    }

    /// Feed one 3-axis acceleration sample; returns the smoothed motion
    /// level once its window has filled.
    pub fn push_acceleration(&mut self, x: f64, y: f64, z: f64) -> CoreResult<Option<f64>> {
        self.ensure_state(SessionState::Running)?;
        self.motion.add_sample(x, y, z)?;
        Ok(self.motion.level())
    }

    /// Queue a wearer-triggered alert for relay.
    pub fn raise_manual_alert(&mut self, text: &str, timestamp_secs: f64) {
        let alert = self.alerts.manual(text, timestamp_secs);
        tracing::info!("manual alert raised: {}", alert.message);
        self.pending_alerts.push(alert);
    }

    /// Drain the alerts raised since the last call (the relay queue).
    pub fn take_alerts(&mut self) -> Vec<AlertMessage> {
        std::mem::take(&mut self.pending_alerts)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The cross-session heart-rate history.
    #[must_use]
    pub fn store(&self) -> &HeartRateStore {
        &self.store
    }

    /// The HRV aggregator.
    #[must_use]
    pub fn hrv(&self) -> &Hrv {
        &self.hrv
    }

    /// The motion aggregator.
    #[must_use]
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    /// The configuration the session was built from.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn ensure_state(&self, expected: SessionState) -> CoreResult<()> {
        if self.state != expected {
            return Err(CoreError::invalid_state(
                expected.to_string(),
                self.state.to_string(),
            ));
        }
        Ok(())
    }
}
