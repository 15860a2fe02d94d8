//! Device identity and static board facts.
//!
//! The board ID is the 6-byte factory MAC from eFuse in uppercase hex
//! (`XXXXXXXXXXXX`).  It is deterministic across reboots and is what
//! `INFO` reports.

use core::fmt::Write;

use crate::app::ports::DeviceInfo;

/// Fixed-size board ID string (12 hex chars).
pub type BoardIdString = heapless::String<16>;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

const CPU: &str = "Xtensa LX7 dual-core (ESP32-S3)";

/// Read the factory MAC address from eFuse.
#[cfg(target_os = "espidf")]
pub fn read_mac() -> MacAddress {
    let mut mac: MacAddress = [0u8; 6];
    // SAFETY: `mac` is exactly the 6 bytes the call writes.
    unsafe {
        esp_idf_svc::sys::esp_efuse_mac_get_default(mac.as_mut_ptr());
    }
    mac
}

/// Simulation: returns a deterministic fake MAC.
#[cfg(not(target_os = "espidf"))]
pub fn read_mac() -> MacAddress {
    [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE]
}

/// Format all six MAC bytes as uppercase hex.
pub fn board_id(mac: &MacAddress) -> BoardIdString {
    let mut id = BoardIdString::new();
    for b in mac {
        let _ = write!(id, "{b:02X}");
    }
    id
}

/// Collect the facts reported by `INFO`.
pub fn device_info() -> DeviceInfo {
    DeviceInfo {
        board_id: board_id(&read_mac()),
        flash_bytes: flash_size(),
        ram_bytes: ram_size(),
        cpu: CPU,
        sdk_version: sdk_version(),
    }
}

#[cfg(target_os = "espidf")]
fn flash_size() -> u32 {
    let mut size = 0u32;
    // SAFETY: null selects the default (boot) flash chip.
    let ret = unsafe { esp_idf_svc::sys::esp_flash_get_size(core::ptr::null_mut(), &mut size) };
    if ret == esp_idf_svc::sys::ESP_OK {
        size
    } else {
        log::warn!("esp_flash_get_size failed ({})", ret);
        0
    }
}

#[cfg(not(target_os = "espidf"))]
fn flash_size() -> u32 {
    8 * 1024 * 1024
}

#[cfg(target_os = "espidf")]
fn ram_size() -> u32 {
    // SAFETY: pure query.
    unsafe {
        esp_idf_svc::sys::heap_caps_get_total_size(esp_idf_svc::sys::MALLOC_CAP_DEFAULT) as u32
    }
}

#[cfg(not(target_os = "espidf"))]
fn ram_size() -> u32 {
    512 * 1024
}

#[cfg(target_os = "espidf")]
fn sdk_version() -> heapless::String<32> {
    // SAFETY: IDF returns a static NUL-terminated string.
    let raw = unsafe { core::ffi::CStr::from_ptr(esp_idf_svc::sys::esp_get_idf_version()) };
    truncated(raw.to_str().unwrap_or("unknown"))
}

#[cfg(not(target_os = "espidf"))]
fn sdk_version() -> heapless::String<32> {
    truncated("host-sim")
}

fn truncated<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
