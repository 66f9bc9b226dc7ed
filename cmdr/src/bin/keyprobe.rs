// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words keyprobe

//! Raw keystroke probe: puts the terminal in raw mode and prints one
//! diagnostic line per input byte until `q` is read.
//!
//! Exit codes: `0` when the session ends on the sentinel, `1` on any fatal
//! error (reported to stderr by miette before exit).

use clap::Parser;
use miette::IntoDiagnostic;
use r3bl_keyprobe::CLIArg;
use r3bl_tty::{RawModeGuard,
               StdinByteSource,
               TTYResult,
               TerminalError,
               is_stdin_interactive,
               log_support::try_initialize_logging_global,
               run_probe_loop};

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    let enable_logging = cli_arg.global_options.enable_logging;
    if enable_logging {
        try_initialize_logging_global(tracing_core::LevelFilter::DEBUG).ok();
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let result = run_probe_session();
    if let Err(ref report) = result {
        // % is Display, ? is Debug.
        tracing::error!(
            message = "Could not run keyprobe due to the following problem",
            error = ?report
        );
    }

    if enable_logging {
        tracing::debug!(message = "Stop logging...");
    }

    result
}

/// Preflight, enter raw mode, run the probe loop. The guard created here
/// restores the original terminal mode on every exit path out of this
/// function: normal return, early `?` return, and panic unwind.
fn run_probe_session() -> miette::Result<()> {
    if is_stdin_interactive() == TTYResult::IsNotInteractive {
        return Err(TerminalError::NotInteractive).into_diagnostic();
    }

    let _guard = RawModeGuard::new().into_diagnostic()?;

    run_probe_loop(&mut StdinByteSource, &mut std::io::stdout()).into_diagnostic()
}
