//! Shared console context.
//!
//! [`AppContext`] is the single owner of every piece of mutable console
//! state.  The service lends it to command handlers inside a [`Session`],
//! together with the board and the current uptime, for the duration of
//! one dispatched line.

use core::fmt;

use crate::config::ConsoleConfig;

use super::blink::BlinkController;
use super::ports::{Board, SerialPort};
use super::telemetry::{TelemetryAggregator, TelemetrySchedule};

/// All mutable console state.
pub struct AppContext {
    pub config: ConsoleConfig,
    pub blink: BlinkController,
    pub telemetry: TelemetryAggregator,
    pub schedule: TelemetrySchedule,
}

impl AppContext {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            blink: BlinkController::new(&config),
            telemetry: TelemetryAggregator::new(),
            schedule: TelemetrySchedule::new(&config),
            config,
        }
    }
}

/// Everything a command handler may touch while one line is processed.
///
/// Writing to a session sends text straight to the serial transport.
pub struct Session<'a> {
    pub ctx: &'a mut AppContext,
    pub board: &'a mut dyn Board,
    pub now_ms: u64,
}

impl<'a> Session<'a> {
    pub fn new(ctx: &'a mut AppContext, board: &'a mut dyn Board, now_ms: u64) -> Self {
        Self { ctx, board, now_ms }
    }
}

impl fmt::Write for Session<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.board.write(s.as_bytes());
        Ok(())
    }
}

/// `fmt::Write` adapter over any [`SerialPort`].
pub struct SerialWriter<'a, S: SerialPort + ?Sized>(pub &'a mut S);

impl<S: SerialPort + ?Sized> fmt::Write for SerialWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write(s.as_bytes());
        Ok(())
    }
}
