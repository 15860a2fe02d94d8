//! Runtime firmware-control console library.
//!
//! Exposes the pure-logic modules for integration testing and fuzzing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;

// The hardware modules keep a host simulation branch so the crate and its
// adapters build off-target.
pub mod adapters;
pub mod drivers;
pub mod sensors;
