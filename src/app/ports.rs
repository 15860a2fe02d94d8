//! Port traits: the hexagonal boundary between console logic and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ConsoleService (domain)
//! ```
//!
//! Driven adapters (UART, temperature sensor, status LED, reset hardware,
//! event sinks) implement these traits.  The
//! [`ConsoleService`](super::service::ConsoleService) consumes them via
//! generics, so the console core never touches a register directly.

use crate::error::Error;

// ───────────────────────────────────────────────────────────────
// Serial transport (driven adapter: host terminal ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented command transport.
pub trait SerialPort {
    /// Non-blocking read of one byte.  `None` means nothing is pending,
    /// which is not an error.
    fn read_byte(&mut self) -> Option<u8>;

    /// Queue bytes for transmission.  May block briefly when the TX FIFO
    /// is full; a disconnected host simply loses the output.
    fn write(&mut self, bytes: &[u8]);

    /// Block until everything queued has left the wire.
    fn flush(&mut self);

    /// Stop the transport.  No byte is read after this call.
    fn shutdown(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Sensor / actuator ports
// ───────────────────────────────────────────────────────────────

/// Temperature sampling.  One short, bounded, blocking call per sample.
pub trait TemperaturePort {
    fn sample(&mut self) -> Result<f32, Error>;
}

/// The single toggleable output driven by the blink controller.
pub trait OutputPort {
    fn set_output(&mut self, on: bool);
}

/// Static facts about the board reported by `INFO`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub board_id: heapless::String<16>,
    pub flash_bytes: u32,
    pub ram_bytes: u32,
    pub cpu: &'static str,
    pub sdk_version: heapless::String<32>,
}

pub trait DeviceInfoPort {
    fn device_info(&self) -> DeviceInfo;
}

/// Everything a console command handler may touch.
///
/// Blanket-implemented, so any adapter that satisfies the four ports can
/// be handed to the dispatcher as `&mut dyn Board`.
pub trait Board: SerialPort + TemperaturePort + OutputPort + DeviceInfoPort {}

impl<T: SerialPort + TemperaturePort + OutputPort + DeviceInfoPort> Board for T {}

// ───────────────────────────────────────────────────────────────
// Reset port (driven adapter: domain → irreversible hardware)
// ───────────────────────────────────────────────────────────────

/// Where the restart vector should go after the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootTarget {
    /// Boot the application image as usual.
    Application,
    /// Enter the ROM bootloader (serial download mode).
    Bootloader,
}

/// Fire-and-forget reset primitives.
///
/// None of these report failure: a primitive that does not take effect
/// leaves the current firmware running.
pub trait ResetPort {
    /// Jump into the ROM bootloader immediately.  Should not return.
    fn enter_rom_bootloader(&mut self);

    /// Write the scratch marker read by the restart vector.
    fn set_boot_target(&mut self, target: BootTarget);

    /// Arm the watchdog so the chip resets after `delay_ms`.
    fn arm_watchdog_reset(&mut self, delay_ms: u32);

    /// Park the CPU until the hardware reset lands.
    fn halt(&mut self) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
