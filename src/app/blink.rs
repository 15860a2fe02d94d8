//! Status LED blink controller.
//!
//! Owns the only toggleable output.  Commands change `enabled` and the
//! half-period; [`on_tick`](BlinkController::on_tick) is the only
//! time-driven entry point.

use crate::config::{ConsoleConfig, IntervalBounds};

use super::ports::OutputPort;

pub struct BlinkController {
    enabled: bool,
    interval_ms: u32,
    bounds: IntervalBounds,
    last_toggle_ms: u64,
    led_on: bool,
}

impl BlinkController {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            enabled: config.blink_enabled,
            interval_ms: config.blink_interval_ms,
            bounds: config.blink_bounds,
            last_toggle_ms: 0,
            led_on: false,
        }
    }

    /// Flip the LED when enabled and a half-period has elapsed.
    /// Returns the new LED level when a toggle happened.
    pub fn on_tick<O: OutputPort + ?Sized>(&mut self, now_ms: u64, out: &mut O) -> Option<bool> {
        if !self.enabled {
            return None;
        }
        if now_ms.saturating_sub(self.last_toggle_ms) < u64::from(self.interval_ms) {
            return None;
        }
        self.led_on = !self.led_on;
        out.set_output(self.led_on);
        self.last_toggle_ms = now_ms;
        Some(self.led_on)
    }

    /// Input must already be inside [`bounds`](Self::bounds).
    pub fn set_interval(&mut self, interval_ms: u32) {
        debug_assert!(self.bounds.contains(interval_ms));
        self.interval_ms = interval_ms;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop blinking and drive the LED low.
    pub fn disable<O: OutputPort + ?Sized>(&mut self, out: &mut O) {
        self.enabled = false;
        self.led_on = false;
        out.set_output(false);
    }

    /// Restart the half-period from `now_ms`.
    pub fn restart(&mut self, now_ms: u64) {
        self.last_toggle_ms = now_ms;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn bounds(&self) -> IntervalBounds {
        self.bounds
    }

    pub fn led_on(&self) -> bool {
        self.led_on
    }
}
