//! ROM download-mode control.
//!
//! The ESP32-S3 ROM enters the serial download loader on the next reset
//! when `RTC_CNTL_FORCE_DOWNLOAD_BOOT` (bit 0 of `RTC_CNTL_OPTION1_REG`) is
//! set.  The register lives in the RTC domain and survives software and
//! watchdog resets, so it doubles as the boot-target marker.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: volatile access to the RTC register and `esp_restart()`.
//! On host/test: the marker and restart count are kept in memory.

use log::info;

#[cfg(target_os = "espidf")]
const RTC_CNTL_OPTION1_REG: usize = 0x6000_812C;
#[cfg(target_os = "espidf")]
const FORCE_DOWNLOAD_BOOT: u32 = 1 << 0;

#[derive(Default)]
pub struct BootControl {
    #[cfg(not(target_os = "espidf"))]
    download_boot: bool,
    #[cfg(not(target_os = "espidf"))]
    restarts: u32,
}

impl BootControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the download-boot marker for the next reset.
    pub fn set_download_boot(&mut self, enable: bool) {
        #[cfg(target_os = "espidf")]
        {
            let reg = RTC_CNTL_OPTION1_REG as *mut u32;
            // SAFETY: fixed, always-mapped RTC register; read-modify-write
            // from the single console task.
            unsafe {
                let v = core::ptr::read_volatile(reg);
                let v = if enable {
                    v | FORCE_DOWNLOAD_BOOT
                } else {
                    v & !FORCE_DOWNLOAD_BOOT
                };
                core::ptr::write_volatile(reg, v);
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.download_boot = enable;
        }

        info!("Boot marker: {}", if enable { "download" } else { "application" });
    }

    pub fn download_boot(&self) -> bool {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: see `set_download_boot`.
            let v = unsafe { core::ptr::read_volatile(RTC_CNTL_OPTION1_REG as *const u32) };
            v & FORCE_DOWNLOAD_BOOT != 0
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.download_boot
        }
    }

    /// Set the marker and restart straight into the ROM loader.
    pub fn restart_into_rom(&mut self) {
        self.set_download_boot(true);
        self.restart();
    }

    /// Immediate software reset.  Does not return on hardware.
    pub fn restart(&mut self) {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: plain IDF call.
            unsafe {
                esp_idf_svc::sys::esp_restart();
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.restarts += 1;
            info!("BootControl(sim): restart #{}", self.restarts);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}
