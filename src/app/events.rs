//! Outbound application events.
//!
//! The [`ConsoleService`](super::service::ConsoleService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  They are
//! diagnostics for the log, separate from the text responses written to
//! the serial console.

use crate::error::Error;

use super::bootloader::TransitionState;
use super::commands::Effect;

/// Structured events emitted by the console core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service printed its banner and is accepting commands.
    Started {
        blink_interval_ms: u32,
        report_interval_ms: u32,
    },

    /// A periodic temperature sample was recorded.
    Telemetry(TelemetrySnapshot),

    /// The periodic sample could not be taken.
    SensorFault(Error),

    /// The blink controller flipped the LED.
    LedToggled { on: bool, interval_ms: u32 },

    /// A command line was dispatched.
    CommandHandled(Effect),

    /// The bootloader transition controller changed state.
    Transition {
        from: TransitionState,
        to: TransitionState,
    },
}

/// Point-in-time statistics after a periodic sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    /// Readings recorded since boot or the last `RESET_STATS`.
    pub sequence: u32,
    pub celsius: f32,
    pub mean_celsius: f32,
    pub min_celsius: f32,
    pub max_celsius: f32,
}
