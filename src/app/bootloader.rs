//! Bootloader transition controller.
//!
//! Flow: `Armed` → `Quiescing` → `Committed` → hardware reset.
//!
//! `Armed` is the only steady state.  A reset request prints a farewell
//! line, flushes and shuts the transport down (`Quiescing`), then issues
//! one irreversible primitive (`Committed`).  There is no path back to
//! `Armed`: if the primitive fails to fire, the caller parks the CPU and
//! the old firmware keeps its state until the next power cycle or
//! supervision reset.

use core::fmt;
use log::{info, warn};

use super::events::AppEvent;
use super::ports::{BootTarget, EventSink, ResetPort, SerialPort};

/// Which reset path a command asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    /// `BOOTSEL`: jump straight into the ROM bootloader.
    RomBootloader,
    /// `RESET_BOOTSEL`: watchdog reset with the bootloader marker set.
    WatchdogBootloader,
    /// `RESET`: watchdog reset back into the application.
    WatchdogApplication,
}

impl ResetKind {
    fn farewell(self) -> &'static str {
        match self {
            Self::RomBootloader => "Entering BOOTSEL mode for runtime update...",
            Self::WatchdogBootloader => "Resetting to BOOTSEL mode...",
            Self::WatchdogApplication => "Performing soft reset...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Armed,
    Quiescing(ResetKind),
    Committed(ResetKind),
}

impl fmt::Display for TransitionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Armed => write!(f, "Armed"),
            Self::Quiescing(kind) => write!(f, "Quiescing({kind:?})"),
            Self::Committed(kind) => write!(f, "Committed({kind:?})"),
        }
    }
}

pub struct BootloaderController {
    state: TransitionState,
    reset_delay_ms: u32,
}

impl BootloaderController {
    pub fn new(reset_delay_ms: u32) -> Self {
        Self {
            state: TransitionState::Armed,
            reset_delay_ms,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == TransitionState::Armed
    }

    /// Quiesce the transport and fire the requested reset primitive.
    ///
    /// Only honoured from `Armed`; a second request after commit is
    /// ignored.  Returns the state reached.
    pub fn execute<H>(
        &mut self,
        kind: ResetKind,
        hw: &mut H,
        sink: &mut impl EventSink,
    ) -> TransitionState
    where
        H: SerialPort + ResetPort + ?Sized,
    {
        if !self.is_armed() {
            warn!("Reset {:?} ignored in state {}", kind, self.state);
            return self.state;
        }

        // ── Quiescing ─────────────────────────────────────────
        self.enter(TransitionState::Quiescing(kind), sink);
        hw.write(kind.farewell().as_bytes());
        hw.write(b"\n");
        hw.flush();
        hw.shutdown();

        // ── Committed ─────────────────────────────────────────
        self.enter(TransitionState::Committed(kind), sink);
        match kind {
            ResetKind::RomBootloader => hw.enter_rom_bootloader(),
            ResetKind::WatchdogBootloader => {
                hw.set_boot_target(BootTarget::Bootloader);
                hw.arm_watchdog_reset(self.reset_delay_ms);
            }
            ResetKind::WatchdogApplication => {
                hw.set_boot_target(BootTarget::Application);
                hw.arm_watchdog_reset(self.reset_delay_ms);
            }
        }
        self.state
    }

    fn enter(&mut self, to: TransitionState, sink: &mut impl EventSink) {
        let from = self.state;
        self.state = to;
        info!("Bootloader transition {} -> {}", from, to);
        sink.emit(&AppEvent::Transition { from, to });
    }
}
