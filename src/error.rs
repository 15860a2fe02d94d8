//! Unified error type for the hardware side of the firmware.
//!
//! Console input errors live in [`crate::app::error`]; this module covers
//! what the adapters and drivers can report.  All variants are `Copy` so a
//! failed sensor read can be carried inside an [`AppEvent`] without
//! allocation.
//!
//! [`AppEvent`]: crate::app::events::AppEvent

use core::fmt;

/// Every fallible driver or adapter operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// The temperature sensor could not be read.
    Sensor(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Sensor(msg) => write!(f, "sensor: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
