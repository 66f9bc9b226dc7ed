// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Unix/Linux/macOS implementation of raw mode using rustix's safe termios
//! API.
//!
//! The raw configuration is derived from the captured original by clearing
//! individual flags, never by overwriting the whole configuration. Terminal
//! attributes this program does not understand keep whatever values the
//! driver gave them.

use crate::TerminalError;
use rustix::termios::{self,
                      ControlModes,
                      InputModes,
                      LocalModes,
                      OptionalActions,
                      OutputModes,
                      SpecialCodeIndex,
                      Termios};
use std::{io,
          sync::{LazyLock, Mutex, MutexGuard}};

/// Stores the original terminal settings to restore later.
///
/// Captured at most once (first capture wins), never mutated after capture,
/// and consumed by [`restore_mode`] so restoration is exactly-once by
/// construction. Using [`std::sync::LazyLock`] (stabilized in Rust 1.80)
/// instead of `once_cell`.
static ORIGINAL_TERMIOS: LazyLock<Mutex<Option<Termios>>> =
    LazyLock::new(|| Mutex::new(None));

/// Minimum number of bytes before a raw mode read is satisfied. Zero: a read
/// returns as soon as any input is pending.
pub const VMIN_RAW_MODE: u8 = 0;

/// Maximum time a raw mode read waits before returning zero bytes, in tenths
/// of a second. One decisecond = 100 ms of bounded wait per read.
pub const VTIME_RAW_MODE: u8 = 1;

/// Input modes cleared on entry to raw mode: break-condition signaling,
/// CR-to-NL translation, parity checking, high-bit stripping, and software
/// flow control (Ctrl+S / Ctrl+Q).
pub const RAW_MODE_DISABLED_INPUT_MODES: InputModes = InputModes::BRKINT
    .union(InputModes::ICRNL)
    .union(InputModes::INPCK)
    .union(InputModes::ISTRIP)
    .union(InputModes::IXON);

/// Output modes cleared on entry to raw mode: all output post-processing,
/// including the automatic `\n` → `\r\n` translation.
pub const RAW_MODE_DISABLED_OUTPUT_MODES: OutputModes = OutputModes::OPOST;

/// Local modes cleared on entry to raw mode: echo, canonical line buffering,
/// signal-generating keys (Ctrl+C / Ctrl+Z), and extended input processing
/// (Ctrl+V).
pub const RAW_MODE_DISABLED_LOCAL_MODES: LocalModes = LocalModes::ECHO
    .union(LocalModes::ICANON)
    .union(LocalModes::IEXTEN)
    .union(LocalModes::ISIG);

fn lock_original() -> Result<MutexGuard<'static, Option<Termios>>, TerminalError> {
    ORIGINAL_TERMIOS.lock().map_err(|_| TerminalError::StatePoisoned)
}

pub(super) fn capture_original() -> Result<(), TerminalError> {
    let mut original = lock_original()?;
    if original.is_none() {
        let current = termios::tcgetattr(io::stdin()).map_err(TerminalError::Query)?;
        *original = Some(current);
    }
    Ok(())
}

/// Derive the raw mode configuration from the captured original.
///
/// Pure: toggles exactly the documented flags and read-timing codes, leaving
/// every other bit of the configuration untouched.
#[must_use]
pub(super) fn raw_mode_config(original: &Termios) -> Termios {
    // rustix's Termios doesn't implement Copy, so we need to clone.
    let mut raw = original.clone();

    raw.input_modes.remove(RAW_MODE_DISABLED_INPUT_MODES);
    raw.output_modes.remove(RAW_MODE_DISABLED_OUTPUT_MODES);
    raw.local_modes.remove(RAW_MODE_DISABLED_LOCAL_MODES);

    // Force 8-bit characters: clear the size mask, then select CS8.
    raw.control_modes.remove(ControlModes::CSIZE);
    raw.control_modes.insert(ControlModes::CS8);

    raw.special_codes[SpecialCodeIndex::VMIN] = VMIN_RAW_MODE;
    raw.special_codes[SpecialCodeIndex::VTIME] = VTIME_RAW_MODE;

    raw
}

pub(super) fn enter_raw_mode() -> Result<(), TerminalError> {
    let raw = {
        let mut original = lock_original()?;
        let captured = match original.take() {
            Some(captured) => captured,
            None => termios::tcgetattr(io::stdin()).map_err(TerminalError::Query)?,
        };
        let raw = raw_mode_config(&captured);
        *original = Some(captured);
        raw
    };

    // Flush-on-apply (TCSAFLUSH): pending output is drained and unread input
    // discarded at the moment the new mode takes effect.
    termios::tcsetattr(io::stdin(), OptionalActions::Flush, &raw)
        .map_err(TerminalError::Configure)
}

pub(super) fn restore_mode() -> Result<(), TerminalError> {
    let maybe_original = lock_original()?.take();
    if let Some(original) = maybe_original {
        termios::tcsetattr(io::stdin(), OptionalActions::Flush, &original)
            .map_err(TerminalError::Configure)?;
    }
    Ok(())
}
