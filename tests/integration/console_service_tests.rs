//! Integration tests for the ConsoleService → dispatcher → ports pipeline.
//!
//! Each test types lines into a mock UART, polls the service with a
//! manual clock, and asserts on the text written back and the port calls
//! made.

use super::mock_hw::Console;

use fwconsole::app::commands::Effect;
use fwconsole::app::error::CommandError;
use fwconsole::app::events::AppEvent;

// ── Status and help ──────────────────────────────────────────

#[test]
fn start_prints_banner_and_emits_started() {
    let mut c = Console::start();
    assert!(c.sink.events.contains(&AppEvent::Started {
        blink_interval_ms: 250,
        report_interval_ms: 2000,
    }));
    // Banner was already drained; a fresh start prints it again.
    c.svc.start(0, &mut c.hw, &mut c.sink);
    assert!(c.hw.take_output().contains("Type 'HELP' for available commands"));
}

#[test]
fn help_lists_every_command_group() {
    let mut c = Console::start();
    let out = c.command("HELP");
    for kw in [
        "LED Control:",
        "Temperature:",
        "Runtime Updates:",
        "START_TEMP",
        "INTERVAL <ms>",
        "RESET_BOOTSEL",
        "PREPARE",
    ] {
        assert!(out.contains(kw), "HELP missing {kw}:\n{out}");
    }
    assert!(out.contains("Reports every 2000 ms"));
}

#[test]
fn status_reports_defaults() {
    let mut c = Console::start();
    let out = c.command("STATUS");
    assert!(out.contains("System Status:"));
    assert!(out.contains("LED Pin: GPIO2"));
    assert!(out.contains("LED State: OFF"));
    assert!(out.contains("LED Enabled: YES"));
    assert!(out.contains("Blink Delay: 250 ms"));
    assert!(out.contains("Report Interval: 2000 ms"));
    assert!(out.contains("Monitoring: ENABLED"));
}

#[test]
fn crlf_terminated_line_dispatches_once() {
    let mut c = Console::start();
    c.hw.type_bytes(b"STATUS\r\n");
    c.drain();
    let out = c.hw.take_output();
    assert_eq!(out.matches("System Status:").count(), 1);
}

#[test]
fn one_byte_is_consumed_per_poll() {
    let mut c = Console::start();
    c.hw.type_line("HELP");
    c.poll();
    assert_eq!(c.hw.rx.len(), 4);
    assert_eq!(c.svc.pending_input(), 1);
    assert!(c.hw.take_output().is_empty());
}

#[test]
fn unknown_command_lists_keywords() {
    let mut c = Console::start();
    let out = c.command("FOO");
    assert!(out.starts_with("Unknown command: FOO\n"));
    assert!(out.contains("BOOTSEL"));
    assert!(c.sink.events.contains(&AppEvent::CommandHandled(Effect::Unrecognized)));
}

#[test]
fn control_only_lines_are_answered_as_unknown() {
    let mut c = Console::start();
    c.hw.type_bytes(b"\x07\nTEMP\xC2\xB0\n\x1b[A\n");
    c.drain();
    let out = c.hw.take_output();
    assert!(out.contains("Unknown command: ?\n"));
    assert!(out.contains("Unknown command: ?[A\n"));
    let handled = c
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::CommandHandled(_)))
        .count();
    assert_eq!(handled, 3);
}

#[test]
fn pasted_burst_is_consumed_one_byte_per_poll_without_clock_advance() {
    let mut c = Console::start();
    let burst = b"STATUS\nINFO\nHISTORY\n";
    c.hw.type_bytes(burst);
    for _ in 0..burst.len() {
        c.poll();
    }
    assert!(c.hw.rx.is_empty());
    assert_eq!(c.now_ms, 0);
    let out = c.hw.take_output();
    assert!(out.contains("Monitoring:"));
    assert!(out.contains("(empty)"));
}

#[test]
fn lowercase_is_not_a_command() {
    let mut c = Console::start();
    assert!(c.command("status").starts_with("Unknown command: status"));
}

#[test]
fn overlong_line_is_truncated_not_split() {
    let mut c = Console::start();
    let long = "X".repeat(100);
    let out = c.command(&long);
    let expected = format!("Unknown command: {}\n", "X".repeat(64));
    assert!(out.starts_with(&expected));
    assert_eq!(out.matches("Unknown command").count(), 1);
}

// ── LED control ──────────────────────────────────────────────

#[test]
fn led_blinks_at_default_interval() {
    let mut c = Console::start();
    c.advance(1000);
    assert_eq!(c.hw.led_levels, vec![true, false, true, false]);
}

#[test]
fn fast_and_slow_change_blink_delay() {
    let mut c = Console::start();
    assert!(c.command("FAST").contains("125 ms"));
    assert!(c.command("STATUS").contains("Blink Delay: 125 ms"));
    assert!(c.command("SLOW").contains("1000 ms"));
    assert!(c.command("STATUS").contains("Blink Delay: 1000 ms"));
}

#[test]
fn stop_drives_led_low_and_start_resumes() {
    let mut c = Console::start();
    c.advance(250);
    assert!(c.hw.led_on());

    c.command("STOP");
    assert!(!c.hw.led_on());
    let toggles = c.hw.led_levels.len();
    c.advance(1000);
    assert_eq!(c.hw.led_levels.len(), toggles, "LED must not toggle while stopped");
    assert!(c.command("STATUS").contains("LED Enabled: NO"));

    c.command("START");
    c.advance(250);
    assert!(c.hw.led_on());
}

// ── Telemetry ────────────────────────────────────────────────

#[test]
fn periodic_report_after_interval() {
    let mut c = Console::start();
    c.advance(1999);
    assert!(!c.hw.take_output().contains("Temperature Reading"));
    c.advance(1);
    let out = c.hw.take_output();
    assert!(out.contains("Temperature Reading #1:"));
    assert!(out.contains("Current: 24.50 C"));
    assert!(out.contains("Next report in 2000 ms"));
    assert!(
        c.sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::Telemetry(t) if t.sequence == 1))
    );
}

#[test]
fn temp_samples_without_recording() {
    let mut c = Console::start();
    let out = c.command("TEMP");
    assert!(out.contains("Current Temperature: 24.50 C"));
    let stats = c.command("STATS");
    assert!(stats.contains("Readings: 0"));
    assert!(stats.contains("No temperature readings yet"));
}

#[test]
fn stats_and_history_after_three_reports() {
    let mut c = Console::start();
    for celsius in [20.0, 22.0, 27.0] {
        c.hw.celsius = celsius;
        c.advance(2000);
    }
    c.hw.take_output();

    let stats = c.command("STATS");
    assert!(stats.contains("Readings: 3"));
    assert!(stats.contains("Current: 27.00 C"));
    assert!(stats.contains("Average: 23.00 C"));
    assert!(stats.contains("Maximum: 27.00 C"));
    assert!(stats.contains("Minimum: 20.00 C"));

    let history = c.command("HISTORY");
    assert!(history.contains("[ 1] 20.00 C"));
    assert!(history.contains("[ 3] 27.00 C"));
    assert!(!history.contains("[ 4]"));
}

#[test]
fn history_keeps_last_ten_readings() {
    let mut c = Console::start();
    for i in 0..12 {
        c.hw.celsius = i as f32;
        c.advance(2000);
    }
    c.hw.take_output();
    let history = c.command("HISTORY");
    assert!(history.contains("[ 1] 2.00 C"));
    assert!(history.contains("[10] 11.00 C"));
    assert!(!history.contains("[11]"));
}

#[test]
fn reset_stats_clears_readings_and_history() {
    let mut c = Console::start();
    c.advance(4000);
    c.command("RESET_STATS");
    assert!(c.command("STATS").contains("Readings: 0"));
    assert!(c.command("HISTORY").contains("(empty)"));
}

#[test]
fn stop_temp_suspends_reports() {
    let mut c = Console::start();
    c.command("STOP_TEMP");
    c.advance(10_000);
    assert!(!c.hw.take_output().contains("Temperature Reading"));
    assert!(c.command("STATUS").contains("Monitoring: DISABLED"));

    // The schedule is already due, so the first report lands in the same
    // poll that handled the command.
    assert!(c.command("START_TEMP").contains("Temperature Reading #1:"));
}

#[test]
fn start_temp_is_not_shadowed_by_start() {
    let mut c = Console::start();
    c.command("STOP_TEMP");
    let out = c.command("START_TEMP");
    assert!(out.contains("monitoring ENABLED"));
    assert!(!out.contains("blinking"));
}

// ── INTERVAL ─────────────────────────────────────────────────

#[test]
fn interval_in_range_is_applied() {
    let mut c = Console::start();
    assert!(c.command("INTERVAL 1000").contains("set to 1000 ms"));
    assert!(c.command("STATS").contains("Interval: 1000 ms"));
    assert!(c.command("STATUS").contains("Report Interval: 1000 ms"));
    c.advance(1000);
    assert!(c.hw.take_output().contains("Temperature Reading #1:"));
}

#[test]
fn interval_out_of_range_is_rejected() {
    let mut c = Console::start();
    let out = c.command("INTERVAL 99999");
    assert!(out.contains("Error: INTERVAL: out of range, use 500-60000 ms"));
    assert!(c.command("STATUS").contains("Report Interval: 2000 ms"));
    assert!(c.sink.events.contains(&AppEvent::CommandHandled(Effect::Rejected {
        keyword: "INTERVAL",
        error: CommandError::OutOfRange { min: 500, max: 60_000 },
    })));
}

#[test]
fn interval_bounds_are_inclusive() {
    let mut c = Console::start();
    assert!(c.command("INTERVAL 499").contains("Error"));
    assert!(c.command("INTERVAL 500").contains("set to 500 ms"));
    assert!(c.command("INTERVAL 60000").contains("set to 60000 ms"));
    assert!(c.command("INTERVAL 60001").contains("Error"));
}

#[test]
fn interval_non_numeric_is_rejected() {
    let mut c = Console::start();
    let out = c.command("INTERVAL abc");
    assert!(out.contains("Error: INTERVAL: invalid number"));
    assert!(c.command("INTERVAL -5").contains("invalid number"));
    assert!(c.command("STATUS").contains("Report Interval: 2000 ms"));
}

#[test]
fn interval_without_argument_prints_usage() {
    let mut c = Console::start();
    let out = c.command("INTERVAL");
    assert!(out.contains("Current interval: 2000 ms"));
    assert!(out.contains("Usage: INTERVAL <milliseconds> (500-60000)"));
}

// ── Sensor failure ───────────────────────────────────────────

#[test]
fn temp_reports_sensor_failure() {
    let mut c = Console::start();
    c.hw.sensor_fault = true;
    let out = c.command("TEMP");
    assert!(out.contains("Error: TEMP: temperature sensor read failed"));
}

#[test]
fn periodic_sensor_failure_skips_one_slot() {
    let mut c = Console::start();
    c.hw.sensor_fault = true;
    c.advance(2000);
    assert!(!c.hw.take_output().contains("Temperature Reading"));
    assert!(c.sink.events.iter().any(|e| matches!(e, AppEvent::SensorFault(_))));
    assert_eq!(c.hw.samples, 1);

    // Not retried on every iteration.
    c.advance(100);
    assert_eq!(c.hw.samples, 1);

    c.hw.sensor_fault = false;
    c.advance(1900);
    assert!(c.hw.take_output().contains("Temperature Reading #1:"));
}

// ── Device info ──────────────────────────────────────────────

#[test]
fn info_reports_board_facts() {
    let mut c = Console::start();
    let out = c.command("INFO");
    assert!(out.contains("Board ID: 0011223344AA"));
    assert!(out.contains("Flash Size: 8388608 bytes"));
    assert!(out.contains("RAM Size: 512KB"));
    assert!(out.contains("SDK Version: mock-sdk"));
}
