//! Windowed vital statistics for the MirrorHR wearable pipeline.
//!
//! The watch feeds two sensor streams into this crate and reads two
//! derived numbers back:
//!
//! 1. **Ring aggregation** ([`RingAverage`]): a fixed-capacity circular
//!    window with a pluggable reduction, recomputed over the whole window
//!    on every push once it has filled.
//! 2. **HRV** ([`Hrv`]): heart-rate readings through a 50-slot window
//!    reduced to the SDNN (sample standard deviation).
//! 3. **Motion** ([`Motion`]): 3-axis acceleration collapsed to a rounded
//!    per-sample magnitude, smoothed by a 250-slot mean window.
//! 4. **Session lifecycle** ([`MonitorSession`]): start/feed/stop wiring
//!    with a cross-session [`HeartRateStore`] and threshold-based
//!    [`AlertMonitor`] whose [`AlertMessage`]s relay to the companion
//!    device.
//!
//! Until a window has filled once, pushes report the warm-up sentinel
//! (`-1.0`) and the `Option` accessors return `None`; display layers show
//! a placeholder in that phase.
//!
//! # Example
//!
//! ```
//! use mirrorhr_vitals::{MonitorSession, SessionConfig};
//!
//! let mut session = MonitorSession::new(SessionConfig::default()).unwrap();
//! session.start().unwrap();
//!
//! let reading = session.push_heart_rate(72.0, 0.0).unwrap();
//! assert!(reading.hrv_sdnn.is_none()); // 50-sample window still warming up
//!
//! let motion = session.push_acceleration(0.01, -0.02, 0.005).unwrap();
//! assert!(motion.is_none());
//!
//! session.stop().unwrap();
//! ```

#![forbid(unsafe_code)]

pub mod alerts;
pub mod hrv;
pub mod motion;
pub mod ring;
pub mod session;
pub mod store;
pub mod types;

pub use alerts::{AlertKind, AlertMessage, AlertMonitor, AlertThresholds};
pub use hrv::Hrv;
pub use motion::Motion;
pub use ring::{Mean, RingAverage, Sdnn};
pub use session::{MonitorSession, SessionConfig, SessionState};
pub use store::{HeartRateStats, HeartRateStore, HourlySummary};
pub use types::HeartRateReading;
