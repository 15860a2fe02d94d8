//! GPIO / peripheral pin assignments for the ESP32-S3 console board.
//!
//! Single source of truth: drivers and `STATUS` output reference this
//! module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// Discrete status LED, active HIGH.
pub const STATUS_LED_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Console UART (UART0, also used by the ROM serial loader)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 43;
pub const UART_RX_GPIO: i32 = 44;
pub const UART_BAUD: u32 = 115_200;
