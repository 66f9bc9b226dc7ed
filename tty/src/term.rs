// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words isatty

//! Interactivity checks for the process's standard streams.

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TTYResult {
    IsInteractive,
    IsNotInteractive,
}

/// Returns [`TTYResult::IsInteractive`] if stdin is an interactive terminal
/// (TTY).
///
/// The probe needs stdin to be a TTY to read keystrokes; if you run
/// `echo "data" | keyprobe` stdin is a pipe and this returns
/// [`TTYResult::IsNotInteractive`]. More info:
/// <https://unix.stackexchange.com/questions/597083/how-does-piping-affect-stdin>
#[must_use]
pub fn is_stdin_interactive() -> TTYResult {
    if rustix::termios::isatty(std::io::stdin()) {
        TTYResult::IsInteractive
    } else {
        TTYResult::IsNotInteractive
    }
}
