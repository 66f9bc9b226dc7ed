// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! PTY-based integration tests for the byte input loop.
//!
//! Runs the real probe loop against a real pseudo-terminal (see
//! [`generate_pty_test!`]): the master process types bytes into the PTY, the
//! slave runs [`run_probe_loop`] under raw mode, and the master verifies the
//! report lines that come back. Skipped automatically in CI.
//!
//! [`generate_pty_test!`]: crate::generate_pty_test
//! [`run_probe_loop`]: crate::run_probe_loop

mod test_probe_session;
