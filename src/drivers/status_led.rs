//! Single-colour status LED on a GPIO.
//!
//! Generic over [`embedded_hal::digital::OutputPin`]: on ESP-IDF this is an
//! `esp_idf_hal` `PinDriver`, in tests any mock pin.

use embedded_hal::digital::OutputPin;

pub struct StatusLed<P: OutputPin> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> StatusLed<P> {
    /// Takes ownership of the pin and drives it low.
    pub fn new(pin: P) -> Self {
        let mut led = Self { pin, on: true };
        led.set(false);
        led
    }

    pub fn set(&mut self, on: bool) {
        let res = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match res {
            Ok(()) => self.on = on,
            Err(e) => log::warn!("Status LED write failed: {:?}", e),
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
