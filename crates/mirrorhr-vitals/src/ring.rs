//! Fixed-capacity ring aggregator with a pluggable reduction.
//!
//! [`RingAverage`] keeps the most recent N samples in a contiguous,
//! fixed-length buffer addressed by a modulo-incremented write cursor. Once
//! the cursor has wrapped to slot 0 at least once, every further sample
//! recomputes the injected [`WindowReduce`] statistic over the whole
//! window; until then pushes return [`WARMUP_SENTINEL`].
//!
//! The buffer never grows, never filters its input, and holds no resources
//! beyond its storage. It is not internally synchronized; a single producer
//! must apply samples in arrival order, since overwrite semantics make the
//! result depend on the write sequence.
//!
//! ```
//! use mirrorhr_vitals::ring::{Mean, RingAverage};
//!
//! let mut window = RingAverage::new(3, Mean).unwrap();
//! assert_eq!(window.add_sample(1.0), -1.0);
//! assert_eq!(window.add_sample(2.0), -1.0);
//! assert_eq!(window.add_sample(3.0), 2.0);
//! // The oldest sample (1.0) is overwritten on the next push.
//! assert_eq!(window.add_sample(4.0), 3.0);
//! ```

use mirrorhr_core::error::{CoreError, CoreResult};
use mirrorhr_core::traits::WindowReduce;
use mirrorhr_core::{MIN_WINDOW_CAPACITY, WARMUP_SENTINEL};

/// Arithmetic mean of the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

impl WindowReduce for Mean {
    fn reduce(&self, window: &[f64]) -> f64 {
        window.iter().sum::<f64>() / window.len() as f64
    }
}

/// Sample standard deviation of the window (Bessel's correction).
///
/// Divides the squared deviations by `n - 1`, not `n`; the window must hold
/// at least two samples, which [`RingAverage::new`] enforces.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sdnn;

impl WindowReduce for Sdnn {
    fn reduce(&self, window: &[f64]) -> f64 {
        let n = window.len() as f64;
        let avg = window.iter().sum::<f64>() / n;
        let sum_sq: f64 = window.iter().map(|&w| (w - avg) * (w - avg)).sum();
        (sum_sq / (n - 1.0)).sqrt()
    }
}

/// Circular window of the most recent N samples, reduced to one running
/// statistic on every push once the window has filled.
pub struct RingAverage<R> {
    /// Backing storage, always exactly `capacity` long, zero-filled until
    /// overwritten.
    samples: Vec<f64>,
    /// Next slot to overwrite.
    write_index: usize,
    /// Set the first time `write_index` returns to 0 after a push.
    full: bool,
    /// Most recently computed statistic; 0.0 and meaningless until `full`.
    last_statistic: f64,
    /// Injected reduction applied to the whole storage slice.
    reduce: R,
}

impl<R: WindowReduce> RingAverage<R> {
    /// Create a window of `capacity` slots reduced by `reduce`.
    ///
    /// Capacities below [`MIN_WINDOW_CAPACITY`] are rejected with
    /// [`CoreError::InvalidCapacity`]; a one-slot window would divide by
    /// zero under the SDNN reduction.
    pub fn new(capacity: usize, reduce: R) -> CoreResult<Self> {
        if capacity < MIN_WINDOW_CAPACITY {
            return Err(CoreError::invalid_capacity(capacity, MIN_WINDOW_CAPACITY));
        }
        Ok(Self {
            samples: vec![0.0; capacity],
            write_index: 0,
            full: false,
            last_statistic: 0.0,
            reduce,
        })
    }

    /// Push a sample, overwriting the oldest slot.
    ///
    /// Returns the freshly recomputed statistic once the window has wrapped
    /// at least once (including on the wrapping push itself), and
    /// [`WARMUP_SENTINEL`] before that. The value is stored unchanged; this
    /// layer does no finiteness filtering, so a non-finite sample poisons
    /// the statistic until it is overwritten. The public aggregators screen
    /// their inputs before delegating here.
    pub fn add_sample(&mut self, value: f64) -> f64 {
        self.samples[self.write_index] = value;
        self.write_index = (self.write_index + 1) % self.samples.len();

        if self.write_index == 0 {
            self.full = true;
        }

        if self.full {
            self.last_statistic = self.reduce.reduce(&self.samples);
            return self.last_statistic;
        }

        WARMUP_SENTINEL
    }

    /// Restore the just-constructed state: storage zero-filled, cursor at
    /// slot 0, statistic withdrawn until the next wrap.
    pub fn reset(&mut self) {
        self.samples.fill(0.0);
        self.write_index = 0;
        self.full = false;
        self.last_statistic = 0.0;
    }

    /// The current statistic, or `None` while the window is warming up.
    #[must_use]
    pub fn statistic(&self) -> Option<f64> {
        self.full.then_some(self.last_statistic)
    }

    /// Raw last statistic; 0.0 until the window has wrapped once.
    #[must_use]
    pub fn last_statistic(&self) -> f64 {
        self.last_statistic
    }

    /// Whether the window has been completely overwritten at least once.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Fixed slot count chosen at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }
}
