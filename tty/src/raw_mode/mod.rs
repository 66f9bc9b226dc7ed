// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal raw mode controller.
//!
//! This module transitions the terminal device between its original (cooked)
//! mode and raw mode, and guarantees restoration of the original mode on
//! every exit path.
//!
//! ## Raw Mode vs Cooked Mode
//!
//! **Cooked Mode** (default):
//! - Input is line-buffered (waits for Enter key)
//! - Special characters are interpreted (Ctrl+C sends SIGINT, etc.)
//! - Echoing is enabled (typed characters appear on screen)
//!
//! **Raw Mode**:
//! - No line buffering - bytes available immediately
//! - No special character processing - all bytes pass through
//! - No echo - typed characters don't automatically appear
//!
//! Between the terminal and the programs reading input sits the kernel's
//! **line discipline**, which buffers input line-by-line, interprets special
//! characters, and echoes keystrokes. Raw mode bypasses it so bytes flow
//! directly from the terminal to the program. The `stty` command inspects
//! and modifies the same **termios** settings this module manipulates
//! programmatically — `stty -a` is the fastest way to verify what state the
//! terminal is actually in when debugging.
//!
//! ## Mode lifecycle
//!
//! The controller is a linear, one-directional state machine per process
//! lifetime:
//!
//! ```text
//! Uncaptured ──capture_original()──▶ Captured ──enter_raw_mode()──▶ Raw
//!                                                                   │
//!                                            restore_mode() ◀───────┘
//! ```
//!
//! `Raw → Restored` is the only mandatory transition: once raw mode has been
//! entered, the captured original configuration must be restored exactly
//! once before the process exits, on every exit path. Re-entering raw mode
//! after restoration is out of scope.
//!
//! ## Usage Example
//!
//! The recommended way to use raw mode is with the [`RawModeGuard`]:
//!
//! ```no_run
//! use r3bl_tty::RawModeGuard;
//!
//! # fn main() -> Result<(), r3bl_tty::TerminalError> {
//! {
//!     let _guard = RawModeGuard::new()?;
//!     // Terminal is now in raw mode.
//!     // ... read bytes one at a time ...
//! } // Raw mode automatically disabled when guard is dropped.
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform Support
//!
//! - **Unix/Linux/macOS**: Uses rustix's safe termios API
//! - **Other platforms**: [`TerminalError::UnsupportedPlatform`]
//!
//! [`TerminalError::UnsupportedPlatform`]: crate::TerminalError::UnsupportedPlatform

// Private modules (hide internal structure).
mod raw_mode_core;

#[cfg(unix)]
mod raw_mode_unix;

// Re-export the public API (flat, ergonomic surface).
pub use raw_mode_core::*;
#[cfg(unix)]
pub use raw_mode_unix::{RAW_MODE_DISABLED_INPUT_MODES,
                        RAW_MODE_DISABLED_LOCAL_MODES,
                        RAW_MODE_DISABLED_OUTPUT_MODES,
                        VMIN_RAW_MODE,
                        VTIME_RAW_MODE};

// Conditional re-export for automated integration tests (Unix only).
#[cfg(all(unix, any(test, doc)))]
pub mod integration_tests;
