//! Peripheral drivers: status LED, watchdog and boot-mode control.

pub mod boot_control;
pub mod status_led;
pub mod watchdog;
