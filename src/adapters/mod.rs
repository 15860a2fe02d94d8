//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                          | Connects to            |
//! |-------------|-------------------------------------|------------------------|
//! | `hardware`  | SerialPort, TemperaturePort,        | UART, temp sensor,     |
//! |             | OutputPort, DeviceInfoPort,         | GPIO LED, RTC boot     |
//! |             | ResetPort                           | marker, TWDT           |
//! | `serial`    | SerialPort                          | UART0 (espidf only)    |
//! | `log_sink`  | EventSink                           | Serial log output      |
//! | `device_id` | (board facts for `DeviceInfoPort`)  | eFuse MAC, flash, heap |
//! | `time`      | (monotonic uptime)                  | ESP32 system timer     |

pub mod device_id;
pub mod hardware;
pub mod log_sink;
#[cfg(target_os = "espidf")]
pub mod serial;
pub mod time;
