// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The blocking byte-input loop and its collaborators.
//!
//! Runs on top of an active raw mode session (see [`mod@crate::raw_mode`]):
//! reads standard input one byte at a time under the controller's
//! bounded-wait timing, classifies each byte as control or printable, and
//! writes one diagnostic line per byte until the sentinel (`q`) ends the
//! session.
//!
//! The byte supply sits behind the [`ByteSource`] seam so the loop can be
//! driven by scripted input in tests; [`StdinByteSource`] is the production
//! implementation.

// Private modules (hide internal structure).
mod classify;
mod probe_loop;
mod reader;

// Re-export the public API (flat, ergonomic surface).
pub use classify::*;
pub use probe_loop::*;
pub use reader::*;

// Conditional re-export for automated integration tests (Unix only).
#[cfg(all(unix, any(test, doc)))]
pub mod integration_tests;
