// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The probe session loop: read, classify, report, terminate on sentinel.

use crate::{ByteKind, ByteSource, ClassifiedByte, TerminalError, classify};
use std::io::Write;

/// Write one human-readable diagnostic line for a classified byte: the
/// decimal value for a control character, the decimal value and literal
/// glyph for a printable character.
///
/// Lines are CRLF-terminated and flushed immediately: raw mode disables
/// output post-processing, so a bare `\n` would not return the cursor to
/// column zero.
///
/// # Errors
///
/// Returns [`TerminalError::ReportWrite`] when the write or flush fails.
pub fn report(
    classified: &ClassifiedByte,
    out: &mut impl Write,
) -> Result<(), TerminalError> {
    match classified.kind {
        ByteKind::ControlCharacter => write!(out, "{}\r\n", classified.byte)?,
        ByteKind::PrintableCharacter => {
            write!(out, "{} ('{}')\r\n", classified.byte, classified.byte as char)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Run the probe session: read one byte per tick, classify and report it,
/// and return normally after reporting a printable byte equal to
/// [`SENTINEL_BYTE`].
///
/// A tick with no input reports nothing and continues; since end-of-input
/// reads identically to a timeout, the loop never exits on end-of-input —
/// only the sentinel or a fatal error ends it.
///
/// # Errors
///
/// Returns [`TerminalError::InputRead`] when a read fails, or
/// [`TerminalError::ReportWrite`] when reporting fails.
///
/// [`SENTINEL_BYTE`]: crate::SENTINEL_BYTE
pub fn run_probe_loop(
    source: &mut impl ByteSource,
    out: &mut impl Write,
) -> Result<(), TerminalError> {
    loop {
        let Some(byte) = source.read_byte()? else {
            continue;
        };
        let classified = classify(byte);
        report(&classified, out)?;
        if classified.is_sentinel() {
            tracing::debug!(message = "Sentinel byte read, ending probe session");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Scripted byte source: yields the script in order, and fails the test
    /// if the loop reads past the end.
    struct ScriptedSource {
        script: Vec<Option<u8>>,
        next: usize,
    }

    impl ScriptedSource {
        fn new(script: &[Option<u8>]) -> Self {
            Self { script: script.to_vec(), next: 0 }
        }

        fn consumed(&self) -> usize { self.next }
    }

    impl ByteSource for ScriptedSource {
        fn read_byte(&mut self) -> Result<Option<u8>, TerminalError> {
            assert!(
                self.next < self.script.len(),
                "loop read past the end of the script"
            );
            let byte = self.script[self.next];
            self.next += 1;
            Ok(byte)
        }
    }

    #[test]
    fn loop_terminates_on_sentinel_without_reading_further() {
        let mut source =
            ScriptedSource::new(&[Some(b'a'), Some(b'b'), Some(b'q'), Some(b'c')]);
        let mut out = Vec::new();

        run_probe_loop(&mut source, &mut out).unwrap();

        // 'q' ends the session; 'c' is never read, never reported.
        assert_eq!(source.consumed(), 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "97 ('a')\r\n98 ('b')\r\n113 ('q')\r\n"
        );
    }

    #[test]
    fn empty_ticks_report_nothing() {
        let mut source = ScriptedSource::new(&[None, None, Some(b'q')]);
        let mut out = Vec::new();

        run_probe_loop(&mut source, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "113 ('q')\r\n");
    }

    #[test]
    fn escape_sequence_bytes_report_as_separate_lines() {
        // Up arrow sends ESC [ A; no multi-byte interpretation happens at
        // this layer, so each byte gets its own line.
        let mut source = ScriptedSource::new(&[Some(27), Some(91), Some(65), Some(113)]);
        let mut out = Vec::new();

        run_probe_loop(&mut source, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "27\r\n91 ('[')\r\n65 ('A')\r\n113 ('q')\r\n"
        );
    }

    #[test]
    fn control_bytes_report_decimal_only() {
        let mut out = Vec::new();
        report(&classify(9), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "9\r\n");
    }

    #[test]
    fn printable_bytes_report_decimal_and_glyph() {
        let mut out = Vec::new();
        report(&classify(b'~'), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "126 ('~')\r\n");
    }
}
