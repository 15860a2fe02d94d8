//! Console command table and dispatcher.
//!
//! Commands are matched by case-sensitive prefix against [`COMMANDS`] in
//! table order.  A keyword that is a prefix of another keyword must come
//! after it (`START_TEMP` before `START`, `RESET_STATS` before `RESET`),
//! otherwise the longer one could never match.  Application commands come
//! first, runtime-update commands last.

use core::fmt::{self, Write};

use log::warn;

use crate::config::HISTORY_DEPTH;
use crate::pins;

use super::bootloader::ResetKind;
use super::context::Session;
use super::error::CommandError;

/// What a dispatched line did.  Consumed for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Console state was changed.
    Applied(&'static str),
    /// Information was printed, nothing changed.
    Reported(&'static str),
    /// The command was recognised but refused; nothing changed.
    Rejected {
        keyword: &'static str,
        error: CommandError,
    },
    /// No keyword matched.
    Unrecognized,
    /// A reset was requested; the service hands it to the transition
    /// controller.
    Reset(ResetKind),
}

/// Command group, used for `HELP` headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Led,
    Telemetry,
    Runtime,
}

impl Family {
    const ALL: [Self; 3] = [Self::Led, Self::Telemetry, Self::Runtime];

    fn heading(self) -> &'static str {
        match self {
            Self::Led => "LED Control",
            Self::Telemetry => "Temperature",
            Self::Runtime => "Runtime Updates",
        }
    }
}

pub type Handler = fn(&mut Session<'_>, &str) -> Result<Effect, CommandError>;

/// Command descriptor
pub struct CommandDescriptor {
    pub keyword: &'static str,
    pub family: Family,
    pub usage: &'static str,
    pub brief: &'static str,
    pub handler: Handler,
}

/// All available commands, in match priority order.
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { keyword: "HELP", family: Family::Led, usage: "HELP", brief: "Show this help", handler: cmd_help },
    CommandDescriptor { keyword: "STATUS", family: Family::Led, usage: "STATUS", brief: "Show current status", handler: cmd_status },
    CommandDescriptor { keyword: "FAST", family: Family::Led, usage: "FAST", brief: "Fast blinking", handler: cmd_fast },
    CommandDescriptor { keyword: "SLOW", family: Family::Led, usage: "SLOW", brief: "Slow blinking", handler: cmd_slow },
    CommandDescriptor { keyword: "START_TEMP", family: Family::Telemetry, usage: "START_TEMP", brief: "Enable monitoring", handler: cmd_start_temp },
    CommandDescriptor { keyword: "STOP_TEMP", family: Family::Telemetry, usage: "STOP_TEMP", brief: "Disable monitoring", handler: cmd_stop_temp },
    CommandDescriptor { keyword: "START", family: Family::Led, usage: "START", brief: "Enable LED blinking", handler: cmd_start },
    CommandDescriptor { keyword: "STOP", family: Family::Led, usage: "STOP", brief: "Disable LED blinking", handler: cmd_stop },
    CommandDescriptor { keyword: "TEMP", family: Family::Telemetry, usage: "TEMP", brief: "Read current temperature", handler: cmd_temp },
    CommandDescriptor { keyword: "STATS", family: Family::Telemetry, usage: "STATS", brief: "Show temperature statistics", handler: cmd_stats },
    CommandDescriptor { keyword: "HISTORY", family: Family::Telemetry, usage: "HISTORY", brief: "Show temperature history", handler: cmd_history },
    CommandDescriptor { keyword: "INTERVAL", family: Family::Telemetry, usage: "INTERVAL <ms>", brief: "Set report interval", handler: cmd_interval },
    CommandDescriptor { keyword: "RESET_STATS", family: Family::Telemetry, usage: "RESET_STATS", brief: "Reset all statistics", handler: cmd_reset_stats },
    CommandDescriptor { keyword: "BOOTSEL", family: Family::Runtime, usage: "BOOTSEL", brief: "Enter bootloader mode", handler: cmd_bootsel },
    CommandDescriptor { keyword: "RESET_BOOTSEL", family: Family::Runtime, usage: "RESET_BOOTSEL", brief: "Reset to bootloader", handler: cmd_reset_bootsel },
    CommandDescriptor { keyword: "RESET", family: Family::Runtime, usage: "RESET", brief: "Soft reset system", handler: cmd_reset },
    CommandDescriptor { keyword: "INFO", family: Family::Runtime, usage: "INFO", brief: "Show device info", handler: cmd_info },
    CommandDescriptor { keyword: "PREPARE", family: Family::Runtime, usage: "PREPARE", brief: "Prepare for update", handler: cmd_prepare },
];

/// Find the first command whose keyword prefixes `line`.
/// Returns the descriptor and the trimmed remainder of the line.
pub fn lookup(line: &str) -> Option<(&'static CommandDescriptor, &str)> {
    COMMANDS
        .iter()
        .find(|c| line.starts_with(c.keyword))
        .map(|c| (c, line[c.keyword.len()..].trim()))
}

/// Execute one command line, writing the response through `s`.
pub fn dispatch(line: &str, s: &mut Session<'_>) -> Effect {
    let Some((cmd, args)) = lookup(line) else {
        let _ = write_unknown(line, s);
        return Effect::Unrecognized;
    };

    match (cmd.handler)(s, args) {
        Ok(effect) => effect,
        Err(error) => {
            let _ = writeln!(s, "Error: {}: {}", cmd.keyword, error);
            Effect::Rejected {
                keyword: cmd.keyword,
                error,
            }
        }
    }
}

fn write_unknown(line: &str, s: &mut Session<'_>) -> fmt::Result {
    writeln!(s, "Unknown command: {line}")?;
    writeln!(s, "Available commands:")?;
    for c in COMMANDS {
        writeln!(s, "   - {:<14} ({})", c.usage, c.brief)?;
    }
    Ok(())
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

fn enabled(on: bool) -> &'static str {
    if on { "ENABLED" } else { "DISABLED" }
}

// --- LED control ---

fn cmd_help(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    let _ = write_help(s);
    Ok(Effect::Reported("HELP"))
}

fn write_help(s: &mut Session<'_>) -> fmt::Result {
    writeln!(s, "Available Commands:")?;
    for family in Family::ALL {
        writeln!(s, "  {}:", family.heading())?;
        for c in COMMANDS.iter().filter(|c| c.family == family) {
            writeln!(s, "    {:<14} - {}", c.usage, c.brief)?;
        }
    }
    let (interval, monitoring, bounds) = (
        s.ctx.schedule.interval_ms(),
        s.ctx.schedule.is_enabled(),
        s.ctx.schedule.bounds(),
    );
    writeln!(
        s,
        "  Reports every {} ms ({}), INTERVAL range {}-{} ms",
        interval,
        enabled(monitoring),
        bounds.min_ms,
        bounds.max_ms
    )
}

fn cmd_status(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    let _ = write_status(s);
    Ok(Effect::Reported("STATUS"))
}

fn write_status(s: &mut Session<'_>) -> fmt::Result {
    let blink = &s.ctx.blink;
    let (led_on, blink_on, delay) = (blink.led_on(), blink.is_enabled(), blink.interval_ms());
    let (report_ms, monitoring) = (s.ctx.schedule.interval_ms(), s.ctx.schedule.is_enabled());
    writeln!(s, "System Status:")?;
    writeln!(s, "   LED Pin: GPIO{}", pins::STATUS_LED_GPIO)?;
    writeln!(s, "   LED State: {}", on_off(led_on))?;
    writeln!(s, "   LED Enabled: {}", if blink_on { "YES" } else { "NO" })?;
    writeln!(s, "   Blink Delay: {delay} ms")?;
    writeln!(s, "   Report Interval: {report_ms} ms")?;
    writeln!(s, "   Monitoring: {}", enabled(monitoring))?;
    writeln!(s, "   Runtime Updates: ENABLED")
}

fn cmd_fast(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    let ms = s.ctx.blink.bounds().check(s.ctx.config.fast_interval_ms)?;
    s.ctx.blink.set_interval(ms);
    let _ = writeln!(s, "Fast blink mode: {ms} ms");
    Ok(Effect::Applied("FAST"))
}

fn cmd_slow(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    let ms = s.ctx.blink.bounds().check(s.ctx.config.slow_interval_ms)?;
    s.ctx.blink.set_interval(ms);
    let _ = writeln!(s, "Slow blink mode: {ms} ms");
    Ok(Effect::Applied("SLOW"))
}

fn cmd_start(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    s.ctx.blink.enable();
    s.ctx.blink.restart(s.now_ms);
    let _ = writeln!(s, "LED blinking enabled");
    Ok(Effect::Applied("START"))
}

fn cmd_stop(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    s.ctx.blink.disable(&mut *s.board);
    let _ = writeln!(s, "LED blinking disabled");
    Ok(Effect::Applied("STOP"))
}

// --- Temperature ---

fn cmd_temp(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    match s.board.sample() {
        Ok(celsius) => {
            let _ = writeln!(s, "Current Temperature: {celsius:.2} C");
            Ok(Effect::Reported("TEMP"))
        }
        Err(e) => {
            warn!("TEMP: {}", e);
            Err(CommandError::SensorFailed)
        }
    }
}

fn cmd_stats(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    let _ = write_stats(s);
    Ok(Effect::Reported("STATS"))
}

fn write_stats(s: &mut Session<'_>) -> fmt::Result {
    let report = s.ctx.telemetry.report();
    let (interval, monitoring) = (s.ctx.schedule.interval_ms(), s.ctx.schedule.is_enabled());
    writeln!(s, "Temperature Statistics:")?;
    writeln!(s, "   Readings: {}", report.count)?;
    write!(s, "{report}")?;
    writeln!(s, "   Interval: {interval} ms")?;
    writeln!(s, "   Monitoring: {}", enabled(monitoring))
}

fn cmd_history(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    let history = s.ctx.telemetry.history();
    let _ = writeln!(s, "Temperature History (last {HISTORY_DEPTH} readings):");
    if history.is_empty() {
        let _ = writeln!(s, "   (empty)");
    }
    for (i, reading) in history.iter().enumerate() {
        let _ = writeln!(s, "   [{:2}] {:.2} C", i + 1, reading.celsius);
    }
    Ok(Effect::Reported("HISTORY"))
}

fn cmd_interval(s: &mut Session<'_>, args: &str) -> Result<Effect, CommandError> {
    if args.is_empty() {
        let (current, bounds) = (s.ctx.schedule.interval_ms(), s.ctx.schedule.bounds());
        let _ = writeln!(s, "Current interval: {current} ms");
        let _ = writeln!(
            s,
            "Usage: INTERVAL <milliseconds> ({}-{})",
            bounds.min_ms, bounds.max_ms
        );
        return Ok(Effect::Reported("INTERVAL"));
    }

    let requested: u32 = args.parse().map_err(|_| CommandError::InvalidNumber)?;
    let ms = s.ctx.schedule.bounds().check(requested)?;
    s.ctx.schedule.set_interval(ms);
    let _ = writeln!(s, "Report interval set to {ms} ms");
    Ok(Effect::Applied("INTERVAL"))
}

fn cmd_start_temp(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    s.ctx.schedule.set_enabled(true);
    let _ = writeln!(s, "Temperature monitoring ENABLED");
    Ok(Effect::Applied("START_TEMP"))
}

fn cmd_stop_temp(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    s.ctx.schedule.set_enabled(false);
    let _ = writeln!(s, "Temperature monitoring DISABLED");
    Ok(Effect::Applied("STOP_TEMP"))
}

fn cmd_reset_stats(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    s.ctx.telemetry.reset();
    let _ = writeln!(s, "Temperature statistics RESET");
    Ok(Effect::Applied("RESET_STATS"))
}

// --- Runtime updates ---

fn cmd_bootsel(_s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    Ok(Effect::Reset(ResetKind::RomBootloader))
}

fn cmd_reset_bootsel(_s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    Ok(Effect::Reset(ResetKind::WatchdogBootloader))
}

fn cmd_reset(_s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    Ok(Effect::Reset(ResetKind::WatchdogApplication))
}

fn cmd_info(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    let _ = write_info(s);
    Ok(Effect::Reported("INFO"))
}

fn write_info(s: &mut Session<'_>) -> fmt::Result {
    let info = s.board.device_info();
    writeln!(s, "Device Information:")?;
    writeln!(s, "   Board ID: {}", info.board_id)?;
    writeln!(s, "   Flash Size: {} bytes", info.flash_bytes)?;
    writeln!(s, "   RAM Size: {}KB", info.ram_bytes / 1024)?;
    writeln!(s, "   CPU: {}", info.cpu)?;
    writeln!(s, "   SDK Version: {}", info.sdk_version)
}

fn cmd_prepare(s: &mut Session<'_>, _args: &str) -> Result<Effect, CommandError> {
    let _ = writeln!(s, "Preparing for firmware update...");
    s.board.flush();
    let _ = write_prepare_hint(s);
    Ok(Effect::Reported("PREPARE"))
}

fn write_prepare_hint(s: &mut Session<'_>) -> fmt::Result {
    writeln!(s, "System prepared for update")?;
    writeln!(s, "Use one of these commands:")?;
    writeln!(s, "   - BOOTSEL        (jump to ROM bootloader now)")?;
    writeln!(s, "   - RESET_BOOTSEL  (watchdog reset into bootloader)")?;
    writeln!(s, "   - then flash the image with the ROM serial loader")
}
