//! Console configuration parameters
//!
//! All tunable parameters for the firmware console live here.  Values are
//! compile-time defaults; the only runtime-adjustable ones (blink and report
//! intervals) are bounded by an [`IntervalBounds`] and validated by the
//! command dispatcher before they reach a controller.

use crate::app::error::CommandError;

/// Maximum bytes kept for one command line.  Extra bytes are dropped.
pub const LINE_CAPACITY: usize = 64;

/// Number of readings retained by the telemetry history ring.
pub const HISTORY_DEPTH: usize = 10;

/// Closed millisecond range `[min_ms, max_ms]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalBounds {
    pub min_ms: u32,
    pub max_ms: u32,
}

impl IntervalBounds {
    pub const fn new(min_ms: u32, max_ms: u32) -> Self {
        Self { min_ms, max_ms }
    }

    pub fn contains(&self, ms: u32) -> bool {
        (self.min_ms..=self.max_ms).contains(&ms)
    }

    /// Validate a requested interval, returning it unchanged when in range.
    pub fn check(&self, ms: u32) -> Result<u32, CommandError> {
        if self.contains(ms) {
            Ok(ms)
        } else {
            Err(CommandError::OutOfRange {
                min: self.min_ms,
                max: self.max_ms,
            })
        }
    }
}

/// Core console configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    // --- Status LED ---
    /// Blink half-period at boot (milliseconds)
    pub blink_interval_ms: u32,
    /// Half-period selected by `FAST`
    pub fast_interval_ms: u32,
    /// Half-period selected by `SLOW`
    pub slow_interval_ms: u32,
    /// Allowed blink half-period range
    pub blink_bounds: IntervalBounds,
    /// Whether the LED blinks at boot
    pub blink_enabled: bool,

    // --- Telemetry ---
    /// Periodic temperature report interval (milliseconds)
    pub report_interval_ms: u32,
    /// Allowed range for `INTERVAL <ms>`
    pub report_bounds: IntervalBounds,
    /// Whether periodic reports run at boot
    pub monitoring_enabled: bool,

    // --- Reset / supervision ---
    /// Delay between arming the watchdog and the forced reset (milliseconds)
    pub reset_delay_ms: u32,
    /// Main-loop supervision timeout while the console is armed (milliseconds)
    pub supervision_timeout_ms: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            // Status LED
            blink_interval_ms: 250,
            fast_interval_ms: 125,
            slow_interval_ms: 1000,
            blink_bounds: IntervalBounds::new(1, 60_000),
            blink_enabled: true,

            // Telemetry
            report_interval_ms: 2000,
            report_bounds: IntervalBounds::new(500, 60_000),
            monitoring_enabled: true,

            // Reset / supervision
            reset_delay_ms: 100,
            supervision_timeout_ms: 10_000,
        }
    }
}
