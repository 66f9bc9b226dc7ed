// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Logging bootstrap for programs that hold the terminal in raw mode.
//!
//! Logging is **DISABLED** by **default**. If you don't call
//! [`try_initialize_logging_global`] with a value other than
//! [`tracing_core::LevelFilter::OFF`], the [`tracing::info!`],
//! [`tracing::debug!`], etc. macros are no-ops.
//!
//! Output goes to a file, never to stdout or stderr: while the terminal is
//! in raw mode those streams belong to the diagnostic report lines, and
//! anything else written there would interleave with them mid-line.

pub const DEFAULT_LOG_FILE_NAME: &str = "log.txt";

/// Install the global default tracing subscriber, which once set, can't be
/// unset or changed. Great for apps; call it once, early in `main`.
///
/// Writes ANSI-free log lines to [`DEFAULT_LOG_FILE_NAME`] in the current
/// directory via a never-rolling file appender.
///
/// # Errors
///
/// Returns a diagnostic if a global subscriber is already installed.
pub fn try_initialize_logging_global(
    level_filter: impl Into<tracing_core::LevelFilter>,
) -> miette::Result<()> {
    let level_filter: tracing_core::LevelFilter = level_filter.into();

    // Early return if the level filter is off.
    if matches!(level_filter, tracing_core::LevelFilter::OFF) {
        return Ok(());
    }

    let file_appender = tracing_appender::rolling::never(".", DEFAULT_LOG_FILE_NAME);

    tracing_subscriber::fmt()
        .with_max_level(level_filter)
        .with_ansi(false)
        .with_writer(file_appender)
        .try_init()
        .map_err(|e| miette::miette!("failed to install global tracing subscriber: {e}"))
}
