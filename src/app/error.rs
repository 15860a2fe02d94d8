//! Console command errors.
//!
//! Every variant is reported back to the operator as a text line; none of
//! them changes device state.

use core::fmt;

/// Why a command line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The numeric argument could not be parsed as an unsigned integer.
    InvalidNumber,
    /// The numeric argument parsed but falls outside `[min, max]`.
    OutOfRange { min: u32, max: u32 },
    /// The temperature sensor did not return a reading.
    SensorFailed,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::OutOfRange { min, max } => write!(f, "out of range, use {min}-{max} ms"),
            Self::SensorFailed => write!(f, "temperature sensor read failed"),
        }
    }
}
