//! Console service: the hexagonal core.
//!
//! [`ConsoleService`] owns the console context, the line accumulator and
//! the bootloader transition controller.  All I/O flows through port
//! traits injected at call sites, so the whole service runs against mock
//! adapters on the host.
//!
//! ```text
//!  SerialPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//! TemperaturePort │       ConsoleService         │
//!  OutputPort  ◀──│ line · dispatch · telemetry  │──▶ ResetPort
//!                 │   blink · bootloader FSM     │
//!                 └─────────────────────────────┘
//! ```
//!
//! One [`poll`](ConsoleService::poll) never blocks: it consumes at most
//! one serial byte, runs at most one periodic report and at most one LED
//! toggle.  Once a reset has been committed every later poll is a no-op.

use core::fmt::{self, Write};

use log::{debug, info, warn};

use crate::config::ConsoleConfig;
use crate::pins;

use super::bootloader::{BootloaderController, TransitionState};
use super::commands::{self, COMMANDS, Effect, Family};
use super::context::{AppContext, SerialWriter, Session};
use super::events::AppEvent;
use super::line::LineAccumulator;
use super::ports::{Board, EventSink, ResetPort};
use super::telemetry::TelemetryReading;

pub struct ConsoleService {
    ctx: AppContext,
    line: LineAccumulator,
    boot: BootloaderController,
}

impl ConsoleService {
    pub fn new(config: ConsoleConfig) -> Self {
        let boot = BootloaderController::new(config.reset_delay_ms);
        Self {
            ctx: AppContext::new(config),
            line: LineAccumulator::new(),
            boot,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Print the banner and start both periodic timers from `now_ms`.
    pub fn start<H: Board + ?Sized>(&mut self, now_ms: u64, hw: &mut H, sink: &mut impl EventSink) {
        self.ctx.blink.restart(now_ms);
        self.ctx.schedule.mark(now_ms);
        let _ = self.write_banner(&mut SerialWriter(hw));

        let blink_interval_ms = self.ctx.blink.interval_ms();
        let report_interval_ms = self.ctx.schedule.interval_ms();
        info!(
            "Console started (blink {} ms, report {} ms)",
            blink_interval_ms, report_interval_ms
        );
        sink.emit(&AppEvent::Started {
            blink_interval_ms,
            report_interval_ms,
        });
    }

    fn write_banner(&self, out: &mut impl Write) -> fmt::Result {
        writeln!(out, "=== ESP32-S3 Runtime Console ===")?;
        writeln!(
            out,
            "LED on GPIO{}, blink {} ms",
            pins::STATUS_LED_GPIO,
            self.ctx.blink.interval_ms()
        )?;
        writeln!(
            out,
            "Temperature report every {} ms",
            self.ctx.schedule.interval_ms()
        )?;
        write!(out, "Runtime updates:")?;
        for c in COMMANDS.iter().filter(|c| c.family == Family::Runtime) {
            write!(out, " {}", c.keyword)?;
        }
        writeln!(out)?;
        writeln!(out, "Type 'HELP' for available commands")
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one main-loop iteration: serial input → periodic report → LED.
    pub fn poll<H>(&mut self, now_ms: u64, hw: &mut H, sink: &mut impl EventSink)
    where
        H: Board + ResetPort,
    {
        if !self.boot.is_armed() {
            return;
        }

        // 1. Serial input: at most one byte per iteration
        if let Some(line) = hw.read_byte().and_then(|b| self.line.feed(b)) {
            let text = line.text();
            debug!("RX line {:?}", line.as_bytes());
            let effect = {
                let mut session = Session::new(&mut self.ctx, hw, now_ms);
                commands::dispatch(text.as_str(), &mut session)
            };
            sink.emit(&AppEvent::CommandHandled(effect));

            if let Effect::Reset(kind) = effect {
                self.boot.execute(kind, hw, sink);
                return;
            }
        }

        // 2. Periodic telemetry
        if self.ctx.schedule.is_due(now_ms) {
            self.run_report(now_ms, hw, sink);
        }

        // 3. Status LED
        if let Some(on) = self.ctx.blink.on_tick(now_ms, hw) {
            sink.emit(&AppEvent::LedToggled {
                on,
                interval_ms: self.ctx.blink.interval_ms(),
            });
        }
    }

    fn run_report<H: Board + ?Sized>(&mut self, now_ms: u64, hw: &mut H, sink: &mut impl EventSink) {
        // A failed sample still consumes the slot so a dead sensor cannot
        // flood the log on every iteration.
        self.ctx.schedule.mark(now_ms);

        let celsius = match hw.sample() {
            Ok(c) => c,
            Err(e) => {
                warn!("Periodic temperature sample failed: {}", e);
                sink.emit(&AppEvent::SensorFault(e));
                return;
            }
        };

        self.ctx.telemetry.record(TelemetryReading {
            celsius,
            captured_ms: now_ms,
        });
        let _ = self.write_report(&mut SerialWriter(hw));

        if let Some(snapshot) = self.ctx.telemetry.snapshot() {
            sink.emit(&AppEvent::Telemetry(snapshot));
        }
    }

    fn write_report(&self, out: &mut impl Write) -> fmt::Result {
        let report = self.ctx.telemetry.report();
        writeln!(out, "Temperature Reading #{}:", report.count)?;
        write!(out, "{report}")?;
        writeln!(out, "   Next report in {} ms", self.ctx.schedule.interval_ms())
    }

    // ── Queries ───────────────────────────────────────────────

    /// `true` once a reset primitive has been issued.
    pub fn is_halted(&self) -> bool {
        matches!(self.boot.state(), TransitionState::Committed(_))
    }

    pub fn transition_state(&self) -> TransitionState {
        self.boot.state()
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Length of the line currently being typed.
    pub fn pending_input(&self) -> usize {
        self.line.pending()
    }
}
