// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End-to-end probe session over a real PTY.
//!
//! The master types an escape sequence (Up arrow: ESC `[` `A`) followed by
//! the sentinel. Since no multi-byte interpretation happens at this layer,
//! the slave must report four separate lines and then terminate on the
//! sentinel.

use crate::{RawModeGuard, StdinByteSource, generate_pty_test, run_probe_loop};
use std::{io::{BufRead, BufReader, Write},
          time::{Duration, Instant}};

generate_pty_test! {
    /// PTY-based end-to-end test for the probe session.
    ///
    /// ## Test Protocol (Request-Response Pattern)
    ///
    /// 1. **Master waits** for `SLAVE_READY` (raw mode enabled) — bytes sent
    ///    earlier would be discarded by the flush-on-apply mode switch
    /// 2. **Master sends** the bytes `[27, 91, 65, 113]` (ESC `[` `A` `q`)
    /// 3. **Master reads** the report lines and asserts `27`, `91 ('[')`,
    ///    `65 ('A')`, `113 ('q')` arrive in order
    /// 4. **Master waits** for `SUCCESS:` and a clean child exit
    ///
    /// Run with: `cargo test -p r3bl_tty --lib test_probe_session_e2e -- --nocapture`
    test_fn: test_probe_session_e2e,
    master: pty_master_entry_point,
    slave: pty_slave_entry_point
}

/// Master process: types the bytes and verifies the report lines.
fn pty_master_entry_point(
    pty_pair: portable_pty::PtyPair,
    mut child: Box<dyn portable_pty::Child + Send + Sync>,
) {
    eprintln!("🚀 PTY Master: Starting probe session test...");

    let mut writer = pty_pair.master.take_writer().expect("Failed to get writer");
    let reader = pty_pair
        .master
        .try_clone_reader()
        .expect("Failed to get reader");
    let mut buf_reader = BufReader::new(reader);

    eprintln!("📝 PTY Master: Waiting for slave to enter raw mode...");

    let mut slave_ready = false;
    let start_timeout = Instant::now();

    while start_timeout.elapsed() < Duration::from_secs(5) {
        let mut line = String::new();
        match buf_reader.read_line(&mut line) {
            Ok(0) => panic!("EOF reached before slave was ready"),
            Ok(_) => {
                let trimmed = line.trim();
                eprintln!("  ← Slave output: {trimmed}");

                if trimmed.contains("SLAVE_READY") {
                    slave_ready = true;
                    eprintln!("  ✓ Slave is ready (raw mode enabled)");
                    break;
                }
                assert!(!trimmed.contains("FAILED:"), "Test failed: {trimmed}");
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                std::thread::sleep(Duration::from_millis(10));
            }
            Err(e) => panic!("Read error while waiting for slave: {e}"),
        }
    }

    assert!(slave_ready, "Slave never signaled ready");

    eprintln!("📝 PTY Master: Typing ESC [ A q ...");
    writer
        .write_all(&[27, 91, 65, 113])
        .expect("Failed to write input bytes");
    writer.flush().expect("Failed to flush input bytes");

    // The report lines must arrive in input order, one line per byte.
    let mut expected =
        ["27", "91 ('[')", "65 ('A')", "113 ('q')"].into_iter().peekable();
    let mut test_passed = false;
    let read_timeout = Instant::now();

    while read_timeout.elapsed() < Duration::from_secs(5) {
        let mut line = String::new();
        match buf_reader.read_line(&mut line) {
            Ok(0) => {
                eprintln!("  ⚠️  EOF reached");
                break;
            }
            Ok(_) => {
                let trimmed = line.trim();
                eprintln!("  ← Slave output: {trimmed}");

                assert!(!trimmed.contains("FAILED:"), "Test failed: {trimmed}");

                if Some(&trimmed) == expected.peek() {
                    eprintln!("  ✓ Report line matched: {trimmed}");
                    expected.next();
                } else if trimmed.contains("SUCCESS:") {
                    test_passed = true;
                    eprintln!("  ✓ Test passed: {trimmed}");
                    break;
                } else {
                    eprintln!("  ⚠️  Skipping: {trimmed}");
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                std::thread::sleep(Duration::from_millis(10));
            }
            Err(e) => panic!("Read error: {e}"),
        }
    }

    assert!(
        expected.peek().is_none(),
        "Not all report lines arrived; still waiting for {:?}",
        expected.peek()
    );
    assert!(test_passed, "Test did not report success");

    match child.wait() {
        Ok(status) => {
            assert!(status.success(), "Slave exited with failure: {status:?}");
            eprintln!("✅ PTY Master: Slave exited cleanly: {status:?}");
        }
        Err(e) => {
            panic!("Failed to wait for slave: {e}");
        }
    }

    eprintln!("✅ PTY Master: Probe session test passed!");
}

/// Slave process: runs the real probe loop under raw mode.
fn pty_slave_entry_point() -> ! {
    let guard = match RawModeGuard::new() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("⚠️  Slave: Failed to enable raw mode: {e}");
            println!("FAILED: Could not enable raw mode");
            std::io::stdout().flush().expect("Failed to flush");
            std::process::exit(1);
        }
    };

    println!("SLAVE_READY");
    std::io::stdout().flush().expect("Failed to flush");

    if let Err(e) = run_probe_loop(&mut StdinByteSource, &mut std::io::stdout()) {
        eprintln!("⚠️  Slave: Probe loop failed: {e}");
        println!("FAILED: Probe loop returned an error");
        std::io::stdout().flush().expect("Failed to flush");
        std::process::exit(1);
    }

    // Restore the terminal before the closing protocol line.
    drop(guard);

    println!("SUCCESS: Probe session terminated on the sentinel");
    std::io::stdout().flush().expect("Failed to flush");

    eprintln!("🔍 Slave: Completed, exiting");
    // CRITICAL: Exit immediately to prevent test harness from running other tests.
    std::process::exit(0);
}
