// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios keyprobe

//! Raw mode terminal session control and byte-at-a-time input probing.
//!
//! This crate is the foundation layer beneath any terminal-based interactive
//! application: an editor, REPL, or TUI cannot process individual keystrokes
//! (arrow keys, `Ctrl` combinations, escape sequences) until the terminal
//! driver's line-buffering, echoing, and signal-generation behaviors are
//! disabled — and guaranteed to be restored afterward.
//!
//! Two components, strictly ordered by dependency:
//!
//! 1. [`mod@raw_mode`] — the terminal mode controller. Captures the original
//!    termios configuration once, derives the raw configuration by toggling
//!    individual flags, and guarantees restoration on every exit path via
//!    [`RawModeGuard`].
//! 2. [`mod@input`] — the byte input loop. Reads standard input one byte at a
//!    time under the controller's bounded-wait timing, classifies each byte
//!    as control or printable, and reports it as a diagnostic line until the
//!    sentinel byte (`q`) ends the session.
//!
//! ## Usage
//!
//! ```no_run
//! use r3bl_tty::{RawModeGuard, StdinByteSource, run_probe_loop};
//!
//! # fn main() -> Result<(), r3bl_tty::TerminalError> {
//! let _guard = RawModeGuard::new()?;
//! run_probe_loop(&mut StdinByteSource, &mut std::io::stdout())?;
//! # Ok(())
//! # } // Terminal restored when the guard drops, on success and error alike.
//! ```
//!
//! ## Platform support
//!
//! Unix/Linux/macOS via rustix's safe termios API. Other platforms fail with
//! [`TerminalError::UnsupportedPlatform`].

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

pub mod input;
pub mod log_support;
pub mod raw_mode;
pub mod term;
pub mod test_fixtures;

mod errors;

// Re-export the public API (flat, ergonomic surface). The integration test
// modules stay under their parents to keep the root namespace unambiguous.
pub use errors::*;
pub use input::{ByteKind,
                ByteSource,
                ClassifiedByte,
                SENTINEL_BYTE,
                StdinByteSource,
                classify,
                read_one_byte,
                report,
                run_probe_loop};
#[cfg(unix)]
pub use raw_mode::{RAW_MODE_DISABLED_INPUT_MODES,
                   RAW_MODE_DISABLED_LOCAL_MODES,
                   RAW_MODE_DISABLED_OUTPUT_MODES,
                   VMIN_RAW_MODE,
                   VTIME_RAW_MODE};
pub use raw_mode::{RawModeGuard, capture_original, enter_raw_mode, restore_mode};
pub use term::*;
