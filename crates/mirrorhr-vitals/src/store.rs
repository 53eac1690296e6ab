//! Heart-rate history store.
//!
//! Retains recent [`HeartRateReading`]s with a fixed retention cap so the
//! companion side can query history, summary statistics, and the per-hour
//! rows its table view renders. The store deliberately outlives monitoring
//! sessions; only the windowed aggregators reset per session.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::types::HeartRateReading;

const SECS_PER_HOUR: i64 = 3600;

/// Capacity-limited reading store with oldest-first eviction.
pub struct HeartRateStore {
    /// Stored readings (oldest first).
    readings: Vec<HeartRateReading>,
    /// Maximum number of readings to retain.
    max_readings: usize,
}

/// Summary statistics over all stored readings.
#[derive(Debug, Clone)]
pub struct HeartRateStats {
    /// Number of readings in the store.
    pub count: usize,
    /// Mean heart rate (BPM).
    pub bpm_mean: f64,
    /// Minimum heart rate (BPM).
    pub bpm_min: f64,
    /// Maximum heart rate (BPM).
    pub bpm_max: f64,
    /// Fraction of readings taken after the HRV window had filled.
    pub hrv_fraction: f64,
}

/// One hour of history, the row shape the companion table displays.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySummary {
    /// Start of the hour, seconds since the Unix epoch.
    pub hour_start_secs: i64,
    /// Lowest rate observed in the hour (BPM).
    pub min_bpm: f64,
    /// Highest rate observed in the hour (BPM).
    pub max_bpm: f64,
    /// Number of readings in the hour.
    pub count: usize,
}

impl HourlySummary {
    /// The hour start as a UTC timestamp, if representable.
    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.hour_start_secs, 0)
    }
}

impl HeartRateStore {
    /// Create a store retaining at most `max_readings`.
    ///
    /// When the cap is exceeded, the oldest readings are evicted.
    #[must_use]
    pub fn new(max_readings: usize) -> Self {
        Self {
            readings: Vec::with_capacity(max_readings.min(4096)),
            max_readings: max_readings.max(1),
        }
    }

    /// Create with default capacity (3600 readings, an hour at 1 Hz).
    #[must_use]
    pub fn default_capacity() -> Self {
        Self::new(3600)
    }

    /// Push a reading, evicting the oldest if the store is at capacity.
    pub fn push(&mut self, reading: HeartRateReading) {
        if self.readings.len() >= self.max_readings {
            self.readings.remove(0);
        }
        self.readings.push(reading);
    }

    /// The most recent reading, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&HeartRateReading> {
        self.readings.last()
    }

    /// The last `n` readings (most recent last); fewer if the store holds
    /// fewer.
    #[must_use]
    pub fn history(&self, n: usize) -> &[HeartRateReading] {
        let start = self.readings.len().saturating_sub(n);
        &self.readings[start..]
    }

    /// Summary statistics over all stored readings, or `None` when empty.
    #[must_use]
    pub fn stats(&self) -> Option<HeartRateStats> {
        if self.readings.is_empty() {
            return None;
        }

        let n = self.readings.len() as f64;
        let mut sum = 0.0;
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut with_hrv = 0_usize;

        for r in &self.readings {
            sum += r.bpm;
            min = min.min(r.bpm);
            max = max.max(r.bpm);
            if r.has_hrv() {
                with_hrv += 1;
            }
        }

        Some(HeartRateStats {
            count: self.readings.len(),
            bpm_mean: sum / n,
            bpm_min: min,
            bpm_max: max,
            hrv_fraction: with_hrv as f64 / n,
        })
    }

    /// Per-hour min/max/count rows in chronological order.
    ///
    /// Readings with timestamps that do not fall on a representable hour
    /// still group by their hour bucket; ordering comes from the bucket
    /// key, not insertion order.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn hourly_summaries(&self) -> Vec<HourlySummary> {
        let mut buckets: BTreeMap<i64, HourlySummary> = BTreeMap::new();

        for r in &self.readings {
            let hour_start = (r.timestamp_secs / SECS_PER_HOUR as f64).floor() as i64 * SECS_PER_HOUR;
            buckets
                .entry(hour_start)
                .and_modify(|row| {
                    row.min_bpm = row.min_bpm.min(r.bpm);
                    row.max_bpm = row.max_bpm.max(r.bpm);
                    row.count += 1;
                })
                .or_insert(HourlySummary {
                    hour_start_secs: hour_start,
                    min_bpm: r.bpm,
                    max_bpm: r.bpm,
                    count: 1,
                });
        }

        buckets.into_values().collect()
    }

    /// Number of readings currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Maximum retention cap.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.max_readings
    }

    /// Drop all stored readings.
    pub fn clear(&mut self) {
        self.readings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(bpm: f64, ts: f64) -> HeartRateReading {
        HeartRateReading {
            bpm,
            hrv_sdnn: Some(2.0),
            timestamp_secs: ts,
        }
    }

    #[test]
    fn empty_store() {
        let store = HeartRateStore::new(10);
        assert!(store.is_empty());
        assert!(store.latest().is_none());
        assert!(store.stats().is_none());
        assert!(store.hourly_summaries().is_empty());
    }

    #[test]
    fn push_and_latest() {
        let mut store = HeartRateStore::new(10);
        store.push(reading(72.0, 0.0));
        store.push(reading(75.0, 1.0));
        assert_eq!(store.len(), 2);
        assert!((store.latest().unwrap().bpm - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn eviction_at_capacity() {
        let mut store = HeartRateStore::new(3);
        for (i, bpm) in [60.0, 65.0, 70.0, 75.0].iter().enumerate() {
            store.push(reading(*bpm, i as f64));
        }
        assert_eq!(store.len(), 3);
        // 60.0 was evicted
        assert!((store.history(10)[0].bpm - 65.0).abs() < f64::EPSILON);
    }

    #[test]
    fn history_returns_last_n() {
        let mut store = HeartRateStore::new(10);
        for i in 0..5 {
            store.push(reading(60.0 + i as f64, i as f64));
        }
        let last3 = store.history(3);
        assert_eq!(last3.len(), 3);
        assert!((last3[0].bpm - 62.0).abs() < f64::EPSILON);
        assert!((last3[2].bpm - 64.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_computation() {
        let mut store = HeartRateStore::new(10);
        store.push(reading(60.0, 0.0));
        store.push(reading(80.0, 1.0));
        store.push(HeartRateReading {
            bpm: 70.0,
            hrv_sdnn: None,
            timestamp_secs: 2.0,
        });

        let stats = store.stats().unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.bpm_mean - 70.0).abs() < 1e-9);
        assert!((stats.bpm_min - 60.0).abs() < f64::EPSILON);
        assert!((stats.bpm_max - 80.0).abs() < f64::EPSILON);
        assert!((stats.hrv_fraction - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn hourly_grouping() {
        let mut store = HeartRateStore::new(100);
        // Two readings in hour 0, one in hour 1
        store.push(reading(70.0, 100.0));
        store.push(reading(90.0, 3599.0));
        store.push(reading(65.0, 3600.0));

        let rows = store.hourly_summaries();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].hour_start_secs, 0);
        assert_eq!(rows[0].count, 2);
        assert!((rows[0].min_bpm - 70.0).abs() < f64::EPSILON);
        assert!((rows[0].max_bpm - 90.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].hour_start_secs, 3600);
        assert_eq!(rows[1].count, 1);
    }

    #[test]
    fn hourly_rows_carry_a_calendar_time() {
        let mut store = HeartRateStore::new(10);
        store.push(reading(70.0, 1_700_000_000.0));
        let rows = store.hourly_summaries();
        let start = rows[0].start_time().unwrap();
        assert_eq!(start.timestamp() % 3600, 0);
    }

    #[test]
    fn clear_empties_but_keeps_capacity() {
        let mut store = HeartRateStore::new(5);
        store.push(reading(70.0, 0.0));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 5);
    }

    #[test]
    fn default_capacity_is_3600() {
        let store = HeartRateStore::default_capacity();
        assert_eq!(store.capacity(), 3600);
    }
}
