// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Platform-agnostic raw mode API and the RAII guard.
//!
//! The functions here dispatch to the platform implementation; the
//! [`RawModeGuard`] ties restoration to scope exit so no raw mode session
//! can outlive the process without a cleanup attempt.

#[cfg(unix)]
use super::raw_mode_unix;
use crate::TerminalError;

/// Read the terminal's current configuration from the OS and store it as the
/// process-wide original. The first capture wins; calling this again after a
/// capture is a no-op.
///
/// Must run before any mode mutation — nothing could be restored otherwise.
///
/// # Errors
///
/// Returns [`TerminalError::Query`] if the terminal configuration cannot be
/// read (e.g. standard input is not a terminal), or
/// [`TerminalError::UnsupportedPlatform`] on non-Unix platforms.
pub fn capture_original() -> Result<(), TerminalError> {
    #[cfg(unix)]
    {
        raw_mode_unix::capture_original()
    }

    #[cfg(not(unix))]
    {
        Err(TerminalError::UnsupportedPlatform)
    }
}

/// Switch the terminal into raw mode.
///
/// Derives the raw configuration from the captured original (capturing it
/// first if that has not happened yet) by toggling each documented flag
/// individually, then applies it with flush-on-apply semantics: pending
/// output is drained and unread input discarded at the moment the new mode
/// takes effect.
///
/// # Errors
///
/// Returns [`TerminalError::Query`] if the original configuration cannot be
/// captured, [`TerminalError::Configure`] if the OS rejects the raw
/// configuration, or [`TerminalError::UnsupportedPlatform`] on non-Unix
/// platforms.
pub fn enter_raw_mode() -> Result<(), TerminalError> {
    #[cfg(unix)]
    {
        raw_mode_unix::enter_raw_mode()
    }

    #[cfg(not(unix))]
    {
        Err(TerminalError::UnsupportedPlatform)
    }
}

/// Re-apply the originally captured configuration, with the same
/// flush-on-apply semantics as [`enter_raw_mode`].
///
/// The stored original is consumed by this call, so restoration happens at
/// most once per process lifetime; calling again (or calling without a prior
/// capture) is a no-op. Prefer [`RawModeGuard`] over calling this directly.
///
/// # Errors
///
/// Returns [`TerminalError::Configure`] if restoration itself fails, or
/// [`TerminalError::UnsupportedPlatform`] on non-Unix platforms.
pub fn restore_mode() -> Result<(), TerminalError> {
    #[cfg(unix)]
    {
        raw_mode_unix::restore_mode()
    }

    #[cfg(not(unix))]
    {
        Err(TerminalError::UnsupportedPlatform)
    }
}

/// RAII guard that restores the original terminal mode when dropped.
///
/// Created immediately after the original configuration is captured and
/// before any mutation, so restoration is guaranteed across normal returns,
/// early `?` returns, and panic unwinds alike.
#[derive(Debug)]
pub struct RawModeGuard;

impl RawModeGuard {
    /// Capture the original configuration and switch the terminal into raw
    /// mode.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::Query`] or [`TerminalError::Configure`] when
    /// raw mode cannot be entered. See [`enter_raw_mode`] for details.
    pub fn new() -> Result<Self, TerminalError> {
        capture_original()?;
        enter_raw_mode()?;
        tracing::debug!(message = "Entered raw mode");
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(error) = restore_mode() {
            // Report-only: a restoration failure during cleanup must not
            // throw control back into another cleanup attempt. The terminal
            // may still be raw here, so terminate the line with CRLF.
            // % is Display, ? is Debug.
            tracing::error!(message = "Failed to restore terminal mode", error = %error);
            eprint!("failed to restore original terminal mode: {error}\r\n");
        } else {
            tracing::debug!(message = "Restored original terminal mode");
        }
    }
}
