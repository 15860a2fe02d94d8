//! Temperature telemetry: running statistics, a fixed history ring, and the
//! periodic report schedule.
//!
//! ## Statistics
//!
//! [`TelemetryStats`] keeps `count`, `sum`, `min` and `max`.  The mean is
//! derived on demand from `sum / count` and is `None` while `count == 0`.
//! `sum` is an `f32` and drifts over very long runs; the count is bounded by
//! realistic uptime, so this is accepted.
//!
//! ## History
//!
//! [`TelemetryHistory`] is a fixed array with an explicit write index and
//! valid count.  Reading starts at the oldest valid slot.  A reset only
//! zeroes the index and count; stale slot contents are never read because
//! iteration is bounded by the valid count.

use core::fmt;

use crate::config::{ConsoleConfig, HISTORY_DEPTH, IntervalBounds};

use super::events::TelemetrySnapshot;

/// One sensor sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryReading {
    pub celsius: f32,
    /// Uptime (ms) when the sample was taken.
    pub captured_ms: u64,
}

impl TelemetryReading {
    const EMPTY: Self = Self {
        celsius: 0.0,
        captured_ms: 0,
    };
}

// ---------------------------------------------------------------------------
// Running statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct TelemetryStats {
    count: u32,
    sum: f32,
    min: f32,
    max: f32,
}

impl Default for TelemetryStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryStats {
    pub const fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }

    pub fn record(&mut self, celsius: f32) {
        self.count = self.count.saturating_add(1);
        self.sum += celsius;
        self.min = self.min.min(celsius);
        self.max = self.max.max(celsius);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn mean(&self) -> Option<f32> {
        (self.count > 0).then(|| self.sum / self.count as f32)
    }

    pub fn min(&self) -> Option<f32> {
        (self.count > 0).then_some(self.min)
    }

    pub fn max(&self) -> Option<f32> {
        (self.count > 0).then_some(self.max)
    }
}

// ---------------------------------------------------------------------------
// History ring
// ---------------------------------------------------------------------------

pub struct TelemetryHistory<const N: usize> {
    slots: [TelemetryReading; N],
    write_index: usize,
    valid: usize,
}

impl<const N: usize> Default for TelemetryHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TelemetryHistory<N> {
    pub const fn new() -> Self {
        Self {
            slots: [TelemetryReading::EMPTY; N],
            write_index: 0,
            valid: 0,
        }
    }

    pub fn push(&mut self, reading: TelemetryReading) {
        self.slots[self.write_index] = reading;
        self.write_index = (self.write_index + 1) % N;
        self.valid = (self.valid + 1).min(N);
    }

    /// Forget every entry without touching the slots.
    pub fn invalidate(&mut self) {
        self.write_index = 0;
        self.valid = 0;
    }

    pub fn len(&self) -> usize {
        self.valid
    }

    pub fn is_empty(&self) -> bool {
        self.valid == 0
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<TelemetryReading> {
        (self.valid > 0).then(|| self.slots[(self.write_index + N - 1) % N])
    }

    /// Valid entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TelemetryReading> + '_ {
        let oldest = (self.write_index + N - self.valid) % N;
        (0..self.valid).map(move |i| &self.slots[(oldest + i) % N])
    }
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Statistics plus history, updated together by [`record`](Self::record).
#[derive(Default)]
pub struct TelemetryAggregator {
    stats: TelemetryStats,
    history: TelemetryHistory<HISTORY_DEPTH>,
}

impl TelemetryAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reading: TelemetryReading) {
        self.history.push(reading);
        self.stats.record(reading.celsius);
    }

    pub fn reset(&mut self) {
        self.stats.reset();
        self.history.invalidate();
    }

    pub fn stats(&self) -> &TelemetryStats {
        &self.stats
    }

    /// Up to [`HISTORY_DEPTH`] readings, oldest first.
    pub fn history(&self) -> heapless::Vec<TelemetryReading, HISTORY_DEPTH> {
        self.history.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<TelemetryReading> {
        self.history.latest()
    }

    pub fn report(&self) -> TelemetryReport {
        TelemetryReport {
            count: self.stats.count(),
            current: self.latest().map(|r| r.celsius),
            mean: self.stats.mean(),
            min: self.stats.min(),
            max: self.stats.max(),
        }
    }

    /// Snapshot for the event sink; `None` before the first reading.
    pub fn snapshot(&self) -> Option<TelemetrySnapshot> {
        let report = self.report();
        Some(TelemetrySnapshot {
            sequence: report.count,
            celsius: report.current?,
            mean_celsius: report.mean?,
            min_celsius: report.min?,
            max_celsius: report.max?,
        })
    }
}

/// Formatted view of the current statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryReport {
    pub count: u32,
    pub current: Option<f32>,
    pub mean: Option<f32>,
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl fmt::Display for TelemetryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(current), Some(mean), Some(min), Some(max)) =
            (self.current, self.mean, self.min, self.max)
        else {
            return writeln!(f, "No temperature readings yet");
        };
        writeln!(f, "   Current: {current:.2} C")?;
        writeln!(f, "   Average: {mean:.2} C")?;
        writeln!(f, "   Maximum: {max:.2} C")?;
        writeln!(f, "   Minimum: {min:.2} C")
    }
}

// ---------------------------------------------------------------------------
// Report schedule
// ---------------------------------------------------------------------------

/// When the next periodic sample is due.
pub struct TelemetrySchedule {
    enabled: bool,
    interval_ms: u32,
    bounds: IntervalBounds,
    last_report_ms: u64,
}

impl TelemetrySchedule {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            enabled: config.monitoring_enabled,
            interval_ms: config.report_interval_ms,
            bounds: config.report_bounds,
            last_report_ms: 0,
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        self.enabled && now_ms.saturating_sub(self.last_report_ms) >= u64::from(self.interval_ms)
    }

    pub fn mark(&mut self, now_ms: u64) {
        self.last_report_ms = now_ms;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Caller validates against [`bounds`](Self::bounds) first.
    pub fn set_interval(&mut self, interval_ms: u32) {
        debug_assert!(self.bounds.contains(interval_ms));
        self.interval_ms = interval_ms;
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn bounds(&self) -> IntervalBounds {
        self.bounds
    }
}
