//! Text sanitizer for malformed JSON input.
//!
//! Strips the Unicode line/paragraph terminators that break strict JSON
//! parsers, normalizes line endings to `\n`, and writes a cleaned copy of
//! the input. Files are processed in bounded-size chunks so peak memory
//! stays flat on large inputs; undecodable bytes are replaced rather than
//! treated as errors.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tracing::info;

use crate::error::SanitizeError;

/// Characters replaced with a single space before parsing.
const UNUSUAL_TERMINATORS: [char; 9] = [
    '\u{2028}', // LINE SEPARATOR
    '\u{2029}', // PARAGRAPH SEPARATOR
    '\u{0085}', // NEXT LINE
    '\u{000C}', // FORM FEED
    '\u{000B}', // VERTICAL TAB
    '\u{001C}', // FILE SEPARATOR
    '\u{001D}', // GROUP SEPARATOR
    '\u{001E}', // RECORD SEPARATOR
    '\u{001F}', // UNIT SEPARATOR
];

/// The subset known to break strict JSON parsers; counted for diagnostics.
const JSON_BREAKERS: [char; 3] = ['\u{2028}', '\u{2029}', '\u{0085}'];

/// Default chunk size for file sanitization (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Counters reported by a file sanitization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Total decoded characters seen.
    pub chars_seen: u64,
    /// Occurrences of the three parser-breaking characters. Informational
    /// only; a nonzero count does not gate success.
    pub unusual_count: u64,
}

/// Replaces unusual terminators with spaces and normalizes `\r\n` and lone
/// `\r` to `\n`. Idempotent.
pub fn sanitize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if UNUSUAL_TERMINATORS.contains(&c) {
            out.push(' ');
        } else if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

/// Counts occurrences of the three parser-breaking characters.
pub fn count_unusual(text: &str) -> usize {
    text.chars().filter(|c| JSON_BREAKERS.contains(c)).count()
}

/// Decodes as much of `bytes` as possible, replacing invalid sequences with
/// U+FFFD. An incomplete multi-byte sequence at the end is returned as the
/// carry for the next chunk, unless `at_eof`, in which case it is replaced.
fn decode_lossy_with_carry(bytes: Vec<u8>, at_eof: bool) -> (String, Vec<u8>) {
    let mut out = String::with_capacity(bytes.len());
    let mut input = &bytes[..];
    loop {
        match std::str::from_utf8(input) {
            Ok(s) => {
                out.push_str(s);
                return (out, Vec::new());
            }
            Err(err) => {
                let valid = err.valid_up_to();
                out.push_str(&String::from_utf8_lossy(&input[..valid]));
                match err.error_len() {
                    Some(bad) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        input = &input[valid + bad..];
                    }
                    None => {
                        // Truncated sequence at the chunk boundary.
                        if at_eof {
                            out.push(char::REPLACEMENT_CHARACTER);
                            return (out, Vec::new());
                        }
                        return (out, input[valid..].to_vec());
                    }
                }
            }
        }
    }
}

/// Sanitizes `input` into `output` in chunks of `chunk_size` bytes.
///
/// The original file is never mutated. A trailing `\r` is held back across
/// chunk boundaries so a split `\r\n` still collapses to a single `\n`.
pub fn sanitize_file(
    input: &Path,
    output: &Path,
    chunk_size: usize,
) -> Result<SanitizeReport, SanitizeError> {
    if !input.is_file() {
        return Err(SanitizeError::InputNotFound(input.to_path_buf()));
    }

    let size_bytes = fs::metadata(input)?.len();
    info!(
        input = %input.display(),
        size_mb = size_bytes as f64 / (1024.0 * 1024.0),
        "cleaning JSON input"
    );

    let mut reader = File::open(input)?;
    let mut writer = BufWriter::new(File::create(output)?);

    let mut report = SanitizeReport::default();
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut carry: Vec<u8> = Vec::new();
    let mut pending_cr = false;
    let mut chunks_read: u64 = 0;

    loop {
        let n = reader.read(&mut buf)?;
        let at_eof = n == 0;

        carry.extend_from_slice(&buf[..n]);
        let (mut text, rest) = decode_lossy_with_carry(std::mem::take(&mut carry), at_eof);
        carry = rest;

        if pending_cr {
            text.insert(0, '\r');
            pending_cr = false;
        }
        if !at_eof && text.ends_with('\r') {
            text.pop();
            pending_cr = true;
        }

        report.chars_seen += text.chars().count() as u64;
        report.unusual_count += count_unusual(&text) as u64;
        writer.write_all(sanitize_text(&text).as_bytes())?;

        if at_eof {
            break;
        }
        chunks_read += 1;
        if chunks_read % 10 == 0 {
            info!(
                processed_mb = (chunks_read * chunk_size as u64) as f64 / (1024.0 * 1024.0),
                "processing"
            );
        }
    }

    writer.flush()?;
    info!(
        chars = report.chars_seen,
        unusual_terminators = report.unusual_count,
        "cleaning complete"
    );
    Ok(report)
}
