// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! PTY-based integration tests for the raw mode controller.
//!
//! Each test runs as a master/slave process pair over a dedicated
//! pseudo-terminal (see [`generate_pty_test!`]): the slave manipulates the
//! PTY's line discipline and reports `SUCCESS:` / `FAILED:` lines; the
//! master verifies them from outside. Tests are skipped automatically in CI
//! where no terminal is available.
//!
//! - `test_enter_and_restore` — enable changes the configuration, and
//!   dropping the guard restores it bit-for-bit.
//! - `test_flag_isolation` — exactly the documented flags change, all
//!   other configuration bits are untouched.
//! - `test_read_timing` — with no pending input, a raw mode read returns
//!   empty within the bounded wait instead of blocking.
//!
//! [`generate_pty_test!`]: crate::generate_pty_test

mod test_enter_and_restore;
mod test_flag_isolation;
mod test_read_timing;
