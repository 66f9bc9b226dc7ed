// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Basic enable/restore lifecycle.
//!
//! Verifies that raw mode can be entered on a real PTY and that dropping the
//! guard restores the terminal configuration captured before any mutation,
//! field for field.

use crate::{RawModeGuard, generate_pty_test};
use rustix::termios::{self, SpecialCodeIndex};
use std::{io::{BufRead, BufReader, Write},
          time::{Duration, Instant}};

generate_pty_test! {
    /// PTY-based integration test for raw mode enter + restore.
    ///
    /// This test uses a master/slave PTY pair to verify that:
    /// 1. Raw mode can be enabled on a real PTY
    /// 2. Enabling actually changes the line-discipline configuration
    /// 3. Dropping the guard restores the original configuration exactly
    ///
    /// Run with: `cargo test -p r3bl_tty --lib test_raw_mode_enter_and_restore -- --nocapture`
    test_fn: test_raw_mode_enter_and_restore,
    master: pty_master_entry_point,
    slave: pty_slave_entry_point
}

/// Master process: verifies results reported by the slave.
fn pty_master_entry_point(
    pty_pair: portable_pty::PtyPair,
    mut child: Box<dyn portable_pty::Child + Send + Sync>,
) {
    eprintln!("🚀 PTY Master: Starting enter/restore test...");

    let reader = pty_pair
        .master
        .try_clone_reader()
        .expect("Failed to get reader");
    let mut buf_reader = BufReader::new(reader);

    eprintln!("📝 PTY Master: Waiting for slave results...");

    let mut slave_started = false;
    let mut test_passed = false;
    let start_timeout = Instant::now();

    while start_timeout.elapsed() < Duration::from_secs(5) {
        let mut line = String::new();
        match buf_reader.read_line(&mut line) {
            Ok(0) => {
                eprintln!("  ⚠️  EOF reached");
                break;
            }
            Ok(_) => {
                let trimmed = line.trim();
                eprintln!("  ← Slave output: {trimmed}");

                if trimmed.contains("SLAVE_STARTING") {
                    slave_started = true;
                    eprintln!("  ✓ Slave confirmed starting");
                }
                if trimmed.contains("SUCCESS:") {
                    test_passed = true;
                    eprintln!("  ✓ Test passed: {trimmed}");
                    break;
                }
                assert!(!trimmed.contains("FAILED:"), "Test failed: {trimmed}");
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                std::thread::sleep(Duration::from_millis(10));
            }
            Err(e) => panic!("Read error: {e}"),
        }
    }

    assert!(slave_started, "Slave did not start properly");
    assert!(test_passed, "Test did not report success");

    match child.wait() {
        Ok(status) => {
            eprintln!("✅ PTY Master: Slave exited: {status:?}");
        }
        Err(e) => {
            panic!("Failed to wait for slave: {e}");
        }
    }

    eprintln!("✅ PTY Master: Enter/restore test passed!");
}

/// Slave process: enables raw mode, drops the guard, and compares the
/// restored configuration to the pre-capture snapshot.
/// This function MUST exit before returning so other tests don't run.
fn pty_slave_entry_point() -> ! {
    println!("SLAVE_STARTING");
    std::io::stdout().flush().expect("Failed to flush");

    let stdin = std::io::stdin();

    // Snapshot the configuration BEFORE any mutation.
    let before = match termios::tcgetattr(&stdin) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("⚠️  Slave: Failed to get termios before: {e}");
            println!("FAILED: Could not read termios");
            std::io::stdout().flush().expect("Failed to flush");
            std::process::exit(1);
        }
    };

    {
        let _guard = match RawModeGuard::new() {
            Ok(g) => g,
            Err(e) => {
                eprintln!("⚠️  Slave: Failed to enable raw mode: {e}");
                println!("FAILED: Could not enable raw mode");
                std::io::stdout().flush().expect("Failed to flush");
                std::process::exit(1);
            }
        };

        eprintln!("✓ Slave: Raw mode enabled");

        let while_raw = match termios::tcgetattr(&stdin) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("⚠️  Slave: Failed to get termios while raw: {e}");
                println!("FAILED: Could not read termios while raw");
                std::io::stdout().flush().expect("Failed to flush");
                std::process::exit(1);
            }
        };

        if before.local_modes == while_raw.local_modes {
            eprintln!("⚠️  Slave: Local modes didn't change!");
            println!("FAILED: Modes not changed");
            std::io::stdout().flush().expect("Failed to flush");
            std::process::exit(1);
        }

        eprintln!("✓ Slave: Configuration changed, dropping guard...");
        // Guard dropped here restores the original configuration.
    }

    let after = match termios::tcgetattr(&stdin) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("⚠️  Slave: Failed to get termios after restore: {e}");
            println!("FAILED: Could not read termios after restore");
            std::io::stdout().flush().expect("Failed to flush");
            std::process::exit(1);
        }
    };

    // Restoration must reproduce the pre-capture configuration exactly.
    let restored = before.input_modes == after.input_modes
        && before.output_modes == after.output_modes
        && before.control_modes == after.control_modes
        && before.local_modes == after.local_modes
        && before.special_codes[SpecialCodeIndex::VMIN]
            == after.special_codes[SpecialCodeIndex::VMIN]
        && before.special_codes[SpecialCodeIndex::VTIME]
            == after.special_codes[SpecialCodeIndex::VTIME];

    if !restored {
        eprintln!("⚠️  Slave: Restored configuration differs from original");
        println!("FAILED: Restore did not reproduce the original configuration");
        std::io::stdout().flush().expect("Failed to flush");
        std::process::exit(1);
    }

    println!("SUCCESS: Raw mode entered and original configuration restored");
    std::io::stdout().flush().expect("Failed to flush");

    eprintln!("🔍 Slave: Completed, exiting");
    // CRITICAL: Exit immediately to prevent test harness from running other tests.
    std::process::exit(0);
}
