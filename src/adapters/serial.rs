//! UART console transport.
//!
//! Wraps an `esp_idf_hal` [`UartDriver`] on UART0, which is also the port
//! the ROM serial loader listens on.  The driver is held in an `Option`:
//! [`SerialPort::shutdown`] drops it, uninstalling the IDF driver, and all
//! later calls become no-ops.

use esp_idf_hal::delay::{BLOCK, NON_BLOCK};
use esp_idf_hal::gpio::{AnyIOPin, InputPin, OutputPin};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::uart::{config::Config, Uart, UartDriver};
use esp_idf_hal::units::Hertz;
use log::{info, warn};

use crate::app::ports::SerialPort;
use crate::error::Error;
use crate::pins;

pub struct UartConsole {
    uart: Option<UartDriver<'static>>,
}

impl UartConsole {
    pub fn new<U: Uart>(
        uart: impl Peripheral<P = U> + 'static,
        tx: impl Peripheral<P = impl OutputPin> + 'static,
        rx: impl Peripheral<P = impl InputPin> + 'static,
    ) -> Result<Self, Error> {
        let config = Config::new().baudrate(Hertz(pins::UART_BAUD));
        let driver = UartDriver::new(
            uart,
            tx,
            rx,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &config,
        )
        .map_err(|e| {
            warn!("UART init failed: {}", e);
            Error::Init("console uart")
        })?;
        info!(
            "Console UART: TX=GPIO{} RX=GPIO{} @ {} baud",
            pins::UART_TX_GPIO,
            pins::UART_RX_GPIO,
            pins::UART_BAUD
        );
        Ok(Self { uart: Some(driver) })
    }
}

impl SerialPort for UartConsole {
    fn read_byte(&mut self) -> Option<u8> {
        let uart = self.uart.as_mut()?;
        let mut byte = [0u8; 1];
        match uart.read(&mut byte, NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        let Some(uart) = self.uart.as_mut() else {
            return;
        };
        let mut rest = bytes;
        while !rest.is_empty() {
            match uart.write(rest) {
                Ok(0) => break,
                Ok(n) => rest = &rest[n..],
                Err(e) => {
                    warn!("UART write failed: {}", e);
                    break;
                }
            }
        }
    }

    fn flush(&mut self) {
        if let Some(uart) = self.uart.as_mut() {
            if let Err(e) = uart.wait_tx_done(BLOCK) {
                warn!("UART flush failed: {}", e);
            }
        }
    }

    fn shutdown(&mut self) {
        if self.uart.take().is_some() {
            info!("Console UART shut down");
        }
    }
}
