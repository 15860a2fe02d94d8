//! Mock hardware adapter for integration tests.
//!
//! Implements every console port in memory and records each side effect,
//! so tests can assert on the full output and reset history without
//! touching real UART, GPIO or RTC registers.

use std::collections::VecDeque;

use fwconsole::app::events::AppEvent;
use fwconsole::app::ports::{
    BootTarget, DeviceInfo, DeviceInfoPort, EventSink, OutputPort, ResetPort, SerialPort,
    TemperaturePort,
};
use fwconsole::app::service::ConsoleService;
use fwconsole::config::ConsoleConfig;
use fwconsole::error::Error;

// ── Reset call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetCall {
    RomBootloader,
    Target(BootTarget),
    ArmWatchdog(u32),
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
    pub open: bool,
    pub flushes: u32,
    pub shutdowns: u32,
    /// Bytes written after `shutdown`.  Must stay zero.
    pub late_writes: usize,
    pub celsius: f32,
    pub sensor_fault: bool,
    pub samples: u32,
    pub led_levels: Vec<bool>,
    pub resets: Vec<ResetCall>,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            tx: Vec::new(),
            open: true,
            flushes: 0,
            shutdowns: 0,
            late_writes: 0,
            celsius: 24.5,
            sensor_fault: false,
            samples: 0,
            led_levels: Vec::new(),
            resets: Vec::new(),
        }
    }

    /// Queue a line with a `\n` terminator.
    pub fn type_line(&mut self, line: &str) {
        self.rx.extend(line.bytes());
        self.rx.push_back(b'\n');
    }

    pub fn type_bytes(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Drain everything written so far.
    pub fn take_output(&mut self) -> String {
        String::from_utf8(std::mem::take(&mut self.tx)).expect("console output is ASCII")
    }

    pub fn led_on(&self) -> bool {
        self.led_levels.last().copied().unwrap_or(false)
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialPort for MockBoard {
    fn read_byte(&mut self) -> Option<u8> {
        if !self.open {
            return None;
        }
        self.rx.pop_front()
    }

    fn write(&mut self, bytes: &[u8]) {
        if self.open {
            self.tx.extend_from_slice(bytes);
        } else {
            self.late_writes += bytes.len();
        }
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }

    fn shutdown(&mut self) {
        self.shutdowns += 1;
        self.open = false;
    }
}

impl TemperaturePort for MockBoard {
    fn sample(&mut self) -> Result<f32, Error> {
        self.samples += 1;
        if self.sensor_fault {
            Err(Error::Sensor("mock fault"))
        } else {
            Ok(self.celsius)
        }
    }
}

impl OutputPort for MockBoard {
    fn set_output(&mut self, on: bool) {
        self.led_levels.push(on);
    }
}

impl DeviceInfoPort for MockBoard {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            board_id: heapless::String::try_from("0011223344AA").unwrap(),
            flash_bytes: 8 * 1024 * 1024,
            ram_bytes: 512 * 1024,
            cpu: "mock cpu",
            sdk_version: heapless::String::try_from("mock-sdk").unwrap(),
        }
    }
}

impl ResetPort for MockBoard {
    fn enter_rom_bootloader(&mut self) {
        self.resets.push(ResetCall::RomBootloader);
    }

    fn set_boot_target(&mut self, target: BootTarget) {
        self.resets.push(ResetCall::Target(target));
    }

    fn arm_watchdog_reset(&mut self, delay_ms: u32) {
        self.resets.push(ResetCall::ArmWatchdog(delay_ms));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Harness ───────────────────────────────────────────────────

/// A started console with a manual clock.
pub struct Console {
    pub svc: ConsoleService,
    pub hw: MockBoard,
    pub sink: RecordingSink,
    pub now_ms: u64,
}

#[allow(dead_code)]
impl Console {
    pub fn start() -> Self {
        let mut c = Self {
            svc: ConsoleService::new(ConsoleConfig::default()),
            hw: MockBoard::new(),
            sink: RecordingSink::default(),
            now_ms: 0,
        };
        c.svc.start(0, &mut c.hw, &mut c.sink);
        c.hw.take_output();
        c
    }

    pub fn poll(&mut self) {
        self.svc.poll(self.now_ms, &mut self.hw, &mut self.sink);
    }

    /// Poll without advancing the clock until all typed input is consumed
    /// or a reset has committed.
    pub fn drain(&mut self) {
        while !self.hw.rx.is_empty() && self.hw.open && !self.svc.is_halted() {
            self.poll();
        }
    }

    /// Type one line, consume it, return what was written.
    pub fn command(&mut self, line: &str) -> String {
        self.hw.type_line(line);
        self.drain();
        self.hw.take_output()
    }

    /// Advance the clock in 1 ms steps, polling each time.
    pub fn advance(&mut self, ms: u64) {
        for _ in 0..ms {
            self.now_ms += 1;
            self.poll();
        }
    }
}
