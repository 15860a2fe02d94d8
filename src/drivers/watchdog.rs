//! Task Watchdog Timer (TWDT) driver.
//!
//! Two jobs:
//! 1. **Supervision**: reset the device if the main loop stalls for longer
//!    than the configured timeout.  The main loop calls [`Watchdog::feed`]
//!    on every iteration.
//! 2. **Deliberate reset**: [`Watchdog::arm_reset`] shortens the timeout
//!    and stops feeding, so the TWDT fires after `delay_ms`.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::{info, warn};

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
    timeout_ms: u32,
    reset_armed_ms: Option<u32>,
}

impl Watchdog {
    /// Initialise and subscribe the current task to the TWDT.
    pub fn new(timeout_ms: u32) -> Self {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: plain IDF calls on the current task handle.
            unsafe {
                reconfigure(timeout_ms);
                let ret = esp_task_wdt_add(core::ptr::null_mut());
                let subscribed = ret == ESP_OK;
                if subscribed {
                    info!("Watchdog: subscribed ({} ms timeout, panic on trigger)", timeout_ms);
                } else {
                    warn!("Watchdog: failed to subscribe ({})", ret);
                }

                Self {
                    subscribed,
                    timeout_ms,
                    reset_armed_ms: None,
                }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            info!("Watchdog(sim): {} ms timeout", timeout_ms);
            Self {
                timeout_ms,
                reset_armed_ms: None,
            }
        }
    }

    /// Feed the watchdog.  Ignored once a reset has been armed.
    pub fn feed(&self) {
        if self.reset_armed_ms.is_some() {
            return;
        }
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                // SAFETY: the current task is subscribed.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }

    /// Schedule a watchdog reset `delay_ms` from now.  Irreversible.
    pub fn arm_reset(&mut self, delay_ms: u32) {
        if let Some(prev) = self.reset_armed_ms {
            warn!("Watchdog reset already armed ({} ms)", prev);
            return;
        }
        self.reset_armed_ms = Some(delay_ms);

        #[cfg(target_os = "espidf")]
        {
            // SAFETY: see `new`.
            unsafe {
                reconfigure(delay_ms);
                if self.subscribed {
                    // Restart the countdown with the short timeout.
                    esp_task_wdt_reset();
                }
            }
        }

        info!("Watchdog reset armed: {} ms", delay_ms);
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    pub fn reset_armed_ms(&self) -> Option<u32> {
        self.reset_armed_ms
    }
}

#[cfg(target_os = "espidf")]
unsafe fn reconfigure(timeout_ms: u32) {
    let cfg = esp_task_wdt_config_t {
        timeout_ms,
        idle_core_mask: 0,
        trigger_panic: true,
    };
    // SAFETY: `cfg` outlives the call.
    let ret = unsafe { esp_task_wdt_reconfigure(&cfg) };
    if ret != ESP_OK {
        warn!("TWDT reconfigure returned {} (may not be initialised)", ret);
    }
}
