//! On-die temperature sensor of the ESP32-S3.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: installs and enables the internal sensor through the
//! `temperature_sensor_*` driver, range -10..80 C.
//! On host/test: reads from a static `AtomicU32` (f32 bits) for injection,
//! with a fault flag to simulate a failed read.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::error::Error;

/// 25.0 C
#[cfg(not(target_os = "espidf"))]
static SIM_CELSIUS_BITS: AtomicU32 = AtomicU32::new(0x41C8_0000);
#[cfg(not(target_os = "espidf"))]
static SIM_FAULT: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_celsius(celsius: f32) {
    SIM_CELSIUS_BITS.store(celsius.to_bits(), Ordering::Relaxed);
}

/// Make every following read fail until cleared.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_fault(fault: bool) {
    SIM_FAULT.store(fault, Ordering::Relaxed);
}

#[cfg(target_os = "espidf")]
const RANGE_MIN_C: i32 = -10;
#[cfg(target_os = "espidf")]
const RANGE_MAX_C: i32 = 80;

pub struct TemperatureSensor {
    #[cfg(target_os = "espidf")]
    handle: temperature_sensor_handle_t,
}

impl TemperatureSensor {
    /// Install and enable the sensor.
    #[cfg(target_os = "espidf")]
    pub fn new() -> Result<Self, Error> {
        let cfg = temperature_sensor_config_t {
            range_min: RANGE_MIN_C,
            range_max: RANGE_MAX_C,
            clk_src: soc_periph_temperature_sensor_clk_src_t_TEMPERATURE_SENSOR_CLK_SRC_DEFAULT,
            ..Default::default()
        };
        let mut handle: temperature_sensor_handle_t = core::ptr::null_mut();

        // SAFETY: `cfg` and `handle` outlive the calls; the driver owns the
        // handle until `Drop`.
        unsafe {
            if temperature_sensor_install(&cfg, &mut handle) != ESP_OK {
                return Err(Error::Init("temperature sensor install"));
            }
            if temperature_sensor_enable(handle) != ESP_OK {
                temperature_sensor_uninstall(handle);
                return Err(Error::Init("temperature sensor enable"));
            }
        }
        log::info!(
            "Temperature sensor enabled ({}..{} C)",
            RANGE_MIN_C,
            RANGE_MAX_C
        );
        Ok(Self { handle })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self, Error> {
        log::info!("TemperatureSensor(sim): ready");
        Ok(Self {})
    }

    #[cfg(target_os = "espidf")]
    pub fn read(&mut self) -> Result<f32, Error> {
        let mut celsius = 0.0_f32;
        // SAFETY: handle was installed and enabled in `new`.
        let ret = unsafe { temperature_sensor_get_celsius(self.handle, &mut celsius) };
        if ret == ESP_OK {
            Ok(celsius)
        } else {
            Err(Error::Sensor("temperature read failed"))
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&mut self) -> Result<f32, Error> {
        if SIM_FAULT.load(Ordering::Relaxed) {
            return Err(Error::Sensor("temperature read failed"));
        }
        Ok(f32::from_bits(SIM_CELSIUS_BITS.load(Ordering::Relaxed)))
    }
}

#[cfg(target_os = "espidf")]
impl Drop for TemperatureSensor {
    fn drop(&mut self) {
        // SAFETY: handle is valid and enabled.
        unsafe {
            temperature_sensor_disable(self.handle);
            temperature_sensor_uninstall(self.handle);
        }
    }
}
