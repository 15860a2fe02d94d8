//! fwconsole firmware: main entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                   │
//! │                                                           │
//! │  HardwareAdapter          LogEventSink   Esp32TimeAdapter │
//! │  (Serial · Temp · LED ·   (EventSink)    (uptime)         │
//! │   DeviceInfo · Reset)                                     │
//! │                                                           │
//! │  ─────────────── Port Trait Boundary ───────────────      │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │          ConsoleService (pure logic)                │  │
//! │  │  line · dispatch · telemetry · blink · bootloader   │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::task;
use log::{info, warn};

use fwconsole::adapters::device_id;
use fwconsole::adapters::hardware::HardwareAdapter;
use fwconsole::adapters::log_sink::LogEventSink;
use fwconsole::adapters::serial::UartConsole;
use fwconsole::adapters::time::Esp32TimeAdapter;
use fwconsole::app::ports::ResetPort;
use fwconsole::app::service::ConsoleService;
use fwconsole::config::ConsoleConfig;
use fwconsole::drivers::boot_control::BootControl;
use fwconsole::drivers::status_led::StatusLed;
use fwconsole::drivers::watchdog::Watchdog;
use fwconsole::sensors::temperature::TemperatureSensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("fwconsole v{} starting", env!("CARGO_PKG_VERSION"));

    let config = ConsoleConfig::default();
    let peripherals = Peripherals::take()?;

    // ── 2. Boot marker ────────────────────────────────────────
    // A marker left over from RESET_BOOTSEL is consumed by the ROM; clear
    // it so a later crash reset does not land in download mode.
    let mut boot = BootControl::new();
    if boot.download_boot() {
        warn!("Download-boot marker still set at startup, clearing");
        boot.set_download_boot(false);
    }

    // ── 3. Construct adapters ─────────────────────────────────
    let serial = UartConsole::new(
        peripherals.uart0,
        peripherals.pins.gpio43,
        peripherals.pins.gpio44,
    )?;
    let led = StatusLed::new(PinDriver::output(peripherals.pins.gpio2)?);
    let sensor = match TemperatureSensor::new() {
        Ok(s) => Some(s),
        Err(e) => {
            warn!("{}; TEMP and reports will fail", e);
            None
        }
    };
    let info = device_id::device_info();
    info!("Board ID: {} ({})", info.board_id, info.cpu);

    let watchdog = Watchdog::new(config.supervision_timeout_ms);
    let mut hw = HardwareAdapter::new(serial, sensor, led, boot, watchdog, info);

    let mut log_sink = LogEventSink::new();
    let clock = Esp32TimeAdapter::new();

    // ── 4. Console service ────────────────────────────────────
    let mut console = ConsoleService::new(config);
    console.start(clock.uptime_ms(), &mut hw, &mut log_sink);

    info!("System ready. Entering console loop.");

    // ── 5. Main loop ──────────────────────────────────────────
    loop {
        console.poll(clock.uptime_ms(), &mut hw, &mut log_sink);

        if console.is_halted() {
            info!("Reset committed ({}), parking CPU", console.transition_state());
            hw.halt();
        }

        hw.feed_watchdog();
        // One byte per pass: a tick-length sleep here would cap input at
        // the FreeRTOS tick rate.  Idle-task starvation is not supervised.
        task::do_yield();
    }
}
