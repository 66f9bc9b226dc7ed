// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Error taxonomy for terminal mode control and the input probe.
//!
//! Every variant is unrecoverable at the point it is raised: these are
//! one-shot OS-resource operations with no transient-failure model, so there
//! is no retry policy anywhere in this crate. The single exception is
//! [`TerminalError::Configure`] raised while restoring the terminal during
//! cleanup — [`RawModeGuard`] reports it best-effort and never recurses into
//! another restoration attempt.
//!
//! [`RawModeGuard`]: crate::RawModeGuard

use rustix::io::Errno;

#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// The current terminal configuration could not be read (`tcgetattr`).
    ///
    /// Fatal with no fallback: without the original configuration there is
    /// nothing to restore at exit.
    #[error("tcgetattr failed to query the terminal configuration: {0}")]
    Query(#[source] Errno),

    /// A terminal configuration could not be applied (`tcsetattr`), either
    /// when entering raw mode or when restoring the original mode.
    ///
    /// Fatal when entering raw mode; reported-only when raised from the
    /// guaranteed-cleanup path.
    #[error("tcsetattr failed to apply the terminal configuration: {0}")]
    Configure(#[source] Errno),

    /// Reading standard input failed for a reason other than the bounded
    /// wait elapsing with no data.
    #[error("read from standard input failed: {0}")]
    InputRead(#[source] Errno),

    /// A diagnostic report line could not be written to standard output.
    #[error("failed to write report line to standard output: {0}")]
    ReportWrite(#[from] std::io::Error),

    /// Standard input is not connected to an interactive terminal, so there
    /// is no line discipline to reconfigure.
    #[error("standard input is not an interactive terminal (run directly in a terminal, without piping stdin)")]
    NotInteractive,

    /// The lock around the captured terminal configuration was poisoned.
    #[error("terminal state lock poisoned")]
    StatePoisoned,

    /// No termios implementation exists for this platform.
    #[error("raw mode is not supported on this platform")]
    UnsupportedPlatform,
}
