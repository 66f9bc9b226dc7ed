// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures for PTY-based integration tests.
//!
//! Raw mode cannot be exercised meaningfully inside a normal `cargo test`
//! process — in CI there is no terminal at all, and locally mutating the
//! developer's terminal from a test is hostile. The [`generate_pty_test!`]
//! macro solves this by running each test against a dedicated
//! pseudo-terminal pair: a slave process (spawned copy of the test binary)
//! manipulates the PTY's line discipline, while the master process verifies
//! the results from outside.
//!
//! [`generate_pty_test!`]: crate::generate_pty_test

mod generate_pty_test;
