//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger.  Console responses go to the serial port directly;
//! these lines are diagnostics only.

use log::{debug, info, warn};

use crate::app::commands::Effect;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                blink_interval_ms,
                report_interval_ms,
            } => {
                info!(
                    "START | blink={}ms report={}ms",
                    blink_interval_ms, report_interval_ms
                );
            }
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | #{} | T={:.2}\u{00b0}C | avg={:.2} min={:.2} max={:.2}",
                    t.sequence, t.celsius, t.mean_celsius, t.min_celsius, t.max_celsius,
                );
            }
            AppEvent::SensorFault(e) => {
                warn!("TELEM | sample failed: {}", e);
            }
            AppEvent::LedToggled { on, interval_ms } => {
                debug!("LED | {} ({}ms)", if *on { "on" } else { "off" }, interval_ms);
            }
            AppEvent::CommandHandled(effect) => match effect {
                Effect::Applied(kw) => info!("CMD | {} applied", kw),
                Effect::Reported(kw) => debug!("CMD | {} reported", kw),
                Effect::Rejected { keyword, error } => warn!("CMD | {} rejected: {}", keyword, error),
                Effect::Unrecognized => warn!("CMD | unrecognized line"),
                Effect::Reset(kind) => info!("CMD | reset requested: {:?}", kind),
            },
            AppEvent::Transition { from, to } => {
                info!("BOOT | {} -> {}", from, to);
            }
        }
    }
}
