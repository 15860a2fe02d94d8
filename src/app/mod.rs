//! Application core: pure console logic, zero I/O.
//!
//! Line assembly, command dispatch, telemetry aggregation, the blink
//! controller and the bootloader transition controller.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod blink;
pub mod bootloader;
pub mod commands;
pub mod context;
pub mod error;
pub mod events;
pub mod line;
pub mod ports;
pub mod service;
pub mod telemetry;
