//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the serial transport, the temperature sensor, the status LED, the
//! boot-mode control and the watchdog, and exposes them through the
//! console ports.  On non-espidf targets the underlying drivers use
//! cfg-gated simulation stubs, so the adapter itself is host-testable.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{
    BootTarget, DeviceInfo, DeviceInfoPort, OutputPort, ResetPort, SerialPort, TemperaturePort,
};
use crate::drivers::boot_control::BootControl;
use crate::drivers::status_led::StatusLed;
use crate::drivers::watchdog::Watchdog;
use crate::error::Error;
use crate::sensors::temperature::TemperatureSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S: SerialPort, P: OutputPin> {
    serial: S,
    sensor: Option<TemperatureSensor>,
    led: StatusLed<P>,
    boot: BootControl,
    watchdog: Watchdog,
    info: DeviceInfo,
}

impl<S: SerialPort, P: OutputPin> HardwareAdapter<S, P> {
    /// `sensor` is `None` when the sensor failed to initialise; every
    /// sample then reports an error instead of aborting startup.
    pub fn new(
        serial: S,
        sensor: Option<TemperatureSensor>,
        led: StatusLed<P>,
        boot: BootControl,
        watchdog: Watchdog,
        info: DeviceInfo,
    ) -> Self {
        Self {
            serial,
            sensor,
            led,
            boot,
            watchdog,
            info,
        }
    }

    /// Called once per main-loop iteration.
    pub fn feed_watchdog(&self) {
        self.watchdog.feed();
    }

    pub fn boot_control(&self) -> &BootControl {
        &self.boot
    }

    pub fn watchdog(&self) -> &Watchdog {
        &self.watchdog
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }
}

// ── Console ports ─────────────────────────────────────────────

impl<S: SerialPort, P: OutputPin> SerialPort for HardwareAdapter<S, P> {
    fn read_byte(&mut self) -> Option<u8> {
        self.serial.read_byte()
    }

    fn write(&mut self, bytes: &[u8]) {
        self.serial.write(bytes);
    }

    fn flush(&mut self) {
        self.serial.flush();
    }

    fn shutdown(&mut self) {
        self.serial.shutdown();
    }
}

impl<S: SerialPort, P: OutputPin> TemperaturePort for HardwareAdapter<S, P> {
    fn sample(&mut self) -> Result<f32, Error> {
        match self.sensor.as_mut() {
            Some(sensor) => sensor.read(),
            None => Err(Error::Sensor("temperature sensor not initialised")),
        }
    }
}

impl<S: SerialPort, P: OutputPin> OutputPort for HardwareAdapter<S, P> {
    fn set_output(&mut self, on: bool) {
        self.led.set(on);
    }
}

impl<S: SerialPort, P: OutputPin> DeviceInfoPort for HardwareAdapter<S, P> {
    fn device_info(&self) -> DeviceInfo {
        self.info.clone()
    }
}

// ── Reset port ────────────────────────────────────────────────

impl<S: SerialPort, P: OutputPin> ResetPort for HardwareAdapter<S, P> {
    fn enter_rom_bootloader(&mut self) {
        self.boot.restart_into_rom();
        warn!("ROM bootloader entry did not reset the chip");
    }

    fn set_boot_target(&mut self, target: BootTarget) {
        self.boot
            .set_download_boot(target == BootTarget::Bootloader);
    }

    fn arm_watchdog_reset(&mut self, delay_ms: u32) {
        self.watchdog.arm_reset(delay_ms);
    }
}
