// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Single-byte bounded-wait reads from standard input.

use crate::TerminalError;
use rustix::io::Errno;

/// Read at most one byte from standard input under the read timing the raw
/// mode controller established (`VMIN = 0`, `VTIME = 1`).
///
/// Returns `Some(byte)` when input was pending, and `None` when the bounded
/// wait (~100 ms) elapsed with no data — "no input this tick", not an error.
/// End-of-input on the underlying stream also reads as zero bytes and is
/// indistinguishable from a timeout at this layer.
///
/// Reads the stdin file descriptor directly rather than going through
/// [`std::io::Stdin`], whose internal buffering would pull more than one
/// byte at a time.
///
/// # Errors
///
/// Returns [`TerminalError::InputRead`] if the read fails for any reason
/// other than the would-block / interrupted conditions.
pub fn read_one_byte() -> Result<Option<u8>, TerminalError> {
    let mut buf = [0_u8; 1];
    match rustix::io::read(std::io::stdin(), &mut buf) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(buf[0])),
        // EAGAIN shows up on platforms that report a timed-out raw mode read
        // as would-block; EINTR means a signal interrupted the read before
        // any data arrived. Both are "no input this tick".
        Err(errno) if errno == Errno::AGAIN || errno == Errno::INTR => Ok(None),
        Err(errno) => Err(TerminalError::InputRead(errno)),
    }
}

/// Seam between the probe loop and its byte supply, so the loop can be
/// driven by scripted input in tests.
pub trait ByteSource {
    /// Read at most one byte; `None` means no input this tick.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::InputRead`] when the underlying read fails.
    fn read_byte(&mut self) -> Result<Option<u8>, TerminalError>;
}

/// Production byte source: standard input via [`read_one_byte`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StdinByteSource;

impl ByteSource for StdinByteSource {
    fn read_byte(&mut self) -> Result<Option<u8>, TerminalError> { read_one_byte() }
}
