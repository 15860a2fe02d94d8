//! Integration tests for the BOOTSEL / RESET_BOOTSEL / RESET flows.
//!
//! Verifies the quiesce-then-commit ordering, that the transport is dead
//! after commit, and that the service stops processing input.

use super::mock_hw::{Console, ResetCall};

use fwconsole::app::bootloader::{ResetKind, TransitionState};
use fwconsole::app::events::AppEvent;
use fwconsole::app::ports::BootTarget;

#[test]
fn bootsel_quiesces_then_enters_rom() {
    let mut c = Console::start();
    let out = c.command("BOOTSEL");
    assert_eq!(out, "Entering BOOTSEL mode for runtime update...\n");
    assert_eq!(c.hw.flushes, 1);
    assert_eq!(c.hw.shutdowns, 1);
    assert_eq!(c.hw.resets, vec![ResetCall::RomBootloader]);
    assert!(c.svc.is_halted());
    assert_eq!(
        c.svc.transition_state(),
        TransitionState::Committed(ResetKind::RomBootloader)
    );
}

#[test]
fn nothing_is_written_after_bootsel() {
    let mut c = Console::start();
    c.command("BOOTSEL");
    c.hw.open = true;
    c.hw.type_line("STATUS");
    c.advance(5000);
    assert!(c.hw.take_output().is_empty());
    assert_eq!(c.hw.late_writes, 0);
    assert_eq!(c.hw.samples, 0);
    assert_eq!(c.hw.resets.len(), 1);
}

#[test]
fn input_queued_behind_bootsel_is_never_dispatched() {
    let mut c = Console::start();
    c.hw.type_line("BOOTSEL");
    c.hw.type_line("STATUS");
    c.drain();
    assert_eq!(c.hw.rx.len(), "STATUS\n".len());
    let out = c.hw.take_output();
    assert!(!out.contains("System Status"));
    assert_eq!(c.hw.late_writes, 0);
}

#[test]
fn reset_bootsel_sets_marker_and_arms_watchdog() {
    let mut c = Console::start();
    let out = c.command("RESET_BOOTSEL");
    assert_eq!(out, "Resetting to BOOTSEL mode...\n");
    assert_eq!(
        c.hw.resets,
        vec![
            ResetCall::Target(BootTarget::Bootloader),
            ResetCall::ArmWatchdog(100)
        ]
    );
    assert!(c.svc.is_halted());
}

#[test]
fn plain_reset_targets_application() {
    let mut c = Console::start();
    let out = c.command("RESET");
    assert_eq!(out, "Performing soft reset...\n");
    assert_eq!(
        c.hw.resets,
        vec![
            ResetCall::Target(BootTarget::Application),
            ResetCall::ArmWatchdog(100)
        ]
    );
}

#[test]
fn reset_stats_is_not_a_reset() {
    let mut c = Console::start();
    c.command("RESET_STATS");
    assert!(c.hw.resets.is_empty());
    assert!(!c.svc.is_halted());
}

#[test]
fn transition_events_follow_the_state_machine() {
    let mut c = Console::start();
    c.command("RESET_BOOTSEL");
    let transitions: Vec<_> = c
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Transition { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    let kind = ResetKind::WatchdogBootloader;
    assert_eq!(
        transitions,
        vec![
            (TransitionState::Armed, TransitionState::Quiescing(kind)),
            (TransitionState::Quiescing(kind), TransitionState::Committed(kind)),
        ]
    );
}

#[test]
fn prepare_flushes_but_stays_armed() {
    let mut c = Console::start();
    let out = c.command("PREPARE");
    assert!(out.starts_with("Preparing for firmware update...\n"));
    assert!(out.contains("BOOTSEL"));
    assert_eq!(c.hw.flushes, 1);
    assert_eq!(c.hw.shutdowns, 0);
    assert!(c.hw.resets.is_empty());
    assert_eq!(c.svc.transition_state(), TransitionState::Armed);
    assert!(c.command("STATUS").contains("System Status:"));
}
