//! Fuzz target: serial bytes → `ConsoleService::poll`
//!
//! Drives arbitrary byte sequences through the line accumulator and the
//! command dispatcher against an in-memory board, and asserts that the
//! service never panics, never writes after a reset has committed, and
//! keeps every interval inside its bounds.
//!
//! cargo fuzz run fuzz_line_dispatch

#![no_main]

use fwconsole::app::events::AppEvent;
use fwconsole::app::ports::{
    BootTarget, DeviceInfo, DeviceInfoPort, EventSink, OutputPort, ResetPort, SerialPort,
    TemperaturePort,
};
use fwconsole::app::service::ConsoleService;
use fwconsole::config::ConsoleConfig;
use fwconsole::error::Error;
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Board {
    rx: Vec<u8>,
    pos: usize,
    closed: bool,
    late_writes: usize,
    resets: usize,
}

impl SerialPort for Board {
    fn read_byte(&mut self) -> Option<u8> {
        if self.closed {
            return None;
        }
        let b = self.rx.get(self.pos).copied();
        self.pos += 1;
        b
    }
    fn write(&mut self, bytes: &[u8]) {
        if self.closed {
            self.late_writes += bytes.len();
        }
    }
    fn flush(&mut self) {}
    fn shutdown(&mut self) {
        self.closed = true;
    }
}

impl TemperaturePort for Board {
    fn sample(&mut self) -> Result<f32, Error> {
        // Odd positions fail so both sensor paths are exercised.
        if self.pos % 2 == 1 {
            Err(Error::Sensor("fuzz"))
        } else {
            Ok(self.pos as f32 / 8.0)
        }
    }
}

impl OutputPort for Board {
    fn set_output(&mut self, _on: bool) {}
}

impl DeviceInfoPort for Board {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            board_id: heapless::String::new(),
            flash_bytes: 0,
            ram_bytes: 0,
            cpu: "fuzz",
            sdk_version: heapless::String::new(),
        }
    }
}

impl ResetPort for Board {
    fn enter_rom_bootloader(&mut self) {
        self.resets += 1;
    }
    fn set_boot_target(&mut self, _target: BootTarget) {}
    fn arm_watchdog_reset(&mut self, _delay_ms: u32) {
        self.resets += 1;
    }
}

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut board = Board {
        rx: data.to_vec(),
        ..Default::default()
    };
    let mut svc = ConsoleService::new(ConsoleConfig::default());
    svc.start(0, &mut board, &mut NullSink);

    // Advance the clock between polls so reports and blinks interleave
    // with command handling.
    for step in 0..(data.len() as u64 + 4) {
        svc.poll(step * 500, &mut board, &mut NullSink);
    }

    assert_eq!(board.late_writes, 0, "write after shutdown");
    assert!(board.resets <= 1, "more than one reset primitive fired");

    let ctx = svc.context();
    assert!(ctx.schedule.bounds().contains(ctx.schedule.interval_ms()));
    assert!(ctx.blink.bounds().contains(ctx.blink.interval_ms()));
});
