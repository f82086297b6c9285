//! Backslash escapes in delimiter lists
//!
//! The `-d` argument may spell control characters with C-style escapes.
//! [`resolve`] turns them into raw bytes; [`escape`] is its inverse and is
//! used to print delimiter tables in diagnostics.

use crate::error::EscapeError;

const ESCAPE: u8 = b'\\';

/// Map the character following a backslash to the byte it stands for
fn unescape_byte(c: u8) -> Option<u8> {
    match c {
        b'\\' => Some(b'\\'),
        b'a' => Some(0x07),
        b'b' => Some(0x08),
        b'f' => Some(0x0c),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        b'v' => Some(0x0b),
        _ => None,
    }
}

/// Resolve backslash escapes in `raw`, returning the literal bytes.
///
/// Each two-byte escape collapses into one byte, so the output is never
/// longer than the input. The result is not yet decoded as text.
pub fn resolve(raw: &str) -> Result<Vec<u8>, EscapeError> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != ESCAPE {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let Some(&next) = bytes.get(i + 1) else {
            return Err(EscapeError::Dangling { position: i });
        };

        match unescape_byte(next) {
            Some(b) => out.push(b),
            None => {
                // Report the whole character, not just its first byte
                let escape = raw[i + 1..].chars().next().unwrap_or('\u{fffd}');
                return Err(EscapeError::Invalid { escape, position: i });
            }
        }
        i += 2;
    }

    Ok(out)
}

/// Render `bytes` back into escaped form, the inverse of [`resolve`].
///
/// Bytes with a named escape are written as that escape; everything else
/// is kept as-is (invalid UTF-8 is replaced lossily).
pub fn escape(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for c in String::from_utf8_lossy(bytes).chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0b}' => out.push_str("\\v"),
            c => out.push(c),
        }
    }
    out
}
