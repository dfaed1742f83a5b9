//! Protocol codec
//!
//! Request encoding and response framing for the text admin protocol.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! <command> [<arg> ...]\n
//! ```
//!
//! ### Response
//! ```text
//! ERR <code> <percent-encoded message>\n        (error, single line)
//!
//! <data line>\n                                 (success)
//! <data line>\n
//! .\n                                           (or blank line, EOF, idle timeout)
//! ```
//!
//! There is no length prefix. A reply ends at a lone `.`, a blank line, the end
//! of the stream or the first read that hits the socket's idle timeout. `version`
//! relies on the last case: it sends one line and no terminator.

use std::io::{BufRead, ErrorKind, Write};

use crate::error::{AdminError, Result};
use super::{Command, RawResponse, ServerError};

/// Maximum bytes kept per line, newline excluded. Bytes past the cap are dropped
/// up to the end of that line; they never start a new line.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Line that explicitly terminates a multi-line reply
pub const TERMINATOR: &str = ".";

/// Prefix keyword of an error reply
pub const ERROR_PREFIX: &str = "ERR";

/// Result of reading one line from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    /// A line with its trailing newline removed
    Line(String),

    /// The server closed the stream
    Closed,

    /// No data arrived within the read timeout
    TimedOut,
}

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a command as its wire bytes (`line + "\n"`)
pub fn encode_command(command: &Command) -> Vec<u8> {
    let mut line = command.to_line().into_bytes();
    line.push(b'\n');
    line
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let bytes = encode_command(command);
    writer
        .write_all(&bytes)
        .map_err(|e| AdminError::transport("writing request", e))?;
    writer
        .flush()
        .map_err(|e| AdminError::transport("flushing request", e))?;
    Ok(())
}

// =============================================================================
// Response Framing
// =============================================================================

/// Read one line, keeping at most [`MAX_LINE_LEN`] bytes of it
///
/// A timeout that interrupts a partially received line discards the partial data.
/// A final line without a newline is returned when the stream closes.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<LineRead> {
    let mut buf = Vec::with_capacity(128);
    let mut dropped = 0usize;

    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if is_timeout(&e) => {
                if !buf.is_empty() || dropped > 0 {
                    tracing::debug!(
                        "Discarding {} bytes of a partial line after timeout",
                        buf.len() + dropped
                    );
                }
                return Ok(LineRead::TimedOut);
            }
            Err(e) => return Err(AdminError::transport("reading response", e)),
        };

        if available.is_empty() {
            if buf.is_empty() && dropped == 0 {
                return Ok(LineRead::Closed);
            }
            break;
        }

        let (content_len, consumed, complete) = match available.iter().position(|&b| b == b'\n') {
            Some(pos) => (pos, pos + 1, true),
            None => (available.len(), available.len(), false),
        };

        let keep = content_len.min(MAX_LINE_LEN - buf.len());
        buf.extend_from_slice(&available[..keep]);
        dropped += content_len - keep;
        reader.consume(consumed);

        if complete {
            break;
        }
    }

    if dropped > 0 {
        tracing::warn!(
            "Response line exceeded {} bytes, dropped {} trailing bytes",
            MAX_LINE_LEN,
            dropped
        );
    }

    Ok(LineRead::Line(String::from_utf8_lossy(&buf).into_owned()))
}

/// Read and frame a complete reply
///
/// Returns `Ok(None)` when the stream closes or goes idle before the first line,
/// and `Err(AdminError::Server)` when the first line is an `ERR` reply.
///
/// Unlike the PHP GearmanAdmin client, which always keeps the first line as
/// data, the `.` and blank-line terminators apply from the first line on. A
/// `status` reply of a lone `.` (no registered functions) therefore yields zero
/// lines at once instead of `["."]` after waiting out the read timeout.
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Option<RawResponse>> {
    let first = match read_line(reader)? {
        LineRead::Line(line) => line,
        LineRead::Closed => {
            tracing::debug!("Stream closed before the first response line");
            return Ok(None);
        }
        LineRead::TimedOut => {
            tracing::debug!("Timed out waiting for the first response line");
            return Ok(None);
        }
    };

    if let Some(err) = parse_error_line(trim_line(&first)) {
        return Err(AdminError::Server(err));
    }

    let mut lines = Vec::new();
    let mut next = Some(first);
    while let Some(raw) = next {
        let line = trim_line(&raw);
        if line == TERMINATOR || line.is_empty() {
            break;
        }
        tracing::trace!("Response line: {}", line);
        lines.push(line.to_string());

        next = match read_line(reader)? {
            LineRead::Line(line) => Some(line),
            LineRead::Closed => None,
            LineRead::TimedOut => {
                tracing::trace!("Read timed out, treating as end of response");
                None
            }
        };
    }

    Ok(Some(RawResponse::new(lines)))
}

/// Parse an `ERR <code> <message>` line; `None` if the line is not an error
pub fn parse_error_line(line: &str) -> Option<ServerError> {
    let rest = line.strip_prefix(ERROR_PREFIX)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let rest = rest.trim();
    let (code, message) = match rest.split_once(char::is_whitespace) {
        Some((code, message)) => (code, message.trim_start()),
        None => (rest, ""),
    };

    Some(ServerError {
        code: code.to_string(),
        message: percent_decode(message),
    })
}

/// Decode `%XX` escapes and `+` as space. Malformed escapes are kept verbatim.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => match (
                bytes.get(i + 1).and_then(hex_value),
                bytes.get(i + 2).and_then(hex_value),
            ) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 2;
                }
                _ => out.push(b'%'),
            },
            b => out.push(b),
        }
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Strip the whitespace set the server may pad lines with
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

fn hex_value(byte: &u8) -> Option<u8> {
    (*byte as char).to_digit(16).map(|d| d as u8)
}

fn is_timeout(err: &std::io::Error) -> bool {
    // Unix reports an expired SO_RCVTIMEO as WouldBlock, Windows as TimedOut
    matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
