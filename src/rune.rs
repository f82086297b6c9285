//! One-rune-at-a-time UTF-8 reading and writing
//!
//! The mergers work on decoded runes (`char`), never on raw bytes. These
//! adapters sit between them and the underlying byte streams and attach the
//! stream's diagnostic name to every failure.

use crate::error::{PasteError, Result};
use std::io::{ErrorKind, Read, Write};

/// Diagnostic name used for standard output
pub const STDOUT_NAME: &str = "<stdout>";

/// Number of bytes in the UTF-8 sequence introduced by `lead`
fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0xc0..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf7 => Some(4),
        _ => None,
    }
}

/// Decodes runes from a named byte stream
///
/// Reads byte-wise from `R`; wrap files in a `BufReader`. Standard input is
/// already buffered by the standard library.
pub struct RuneReader<R> {
    name: String,
    inner: R,
    offset: u64,
}

impl<R: Read> RuneReader<R> {
    pub fn new(name: impl Into<String>, inner: R) -> Self {
        Self {
            name: name.into(),
            inner,
            offset: 0,
        }
    }

    /// Diagnostic name of the stream
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte offset of the next unread byte
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read one byte, `None` at end of stream
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.offset += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(PasteError::Read {
                        name: self.name.clone(),
                        source,
                    })
                }
            }
        }
    }

    fn decode_error(&self, offset: u64) -> PasteError {
        PasteError::Decode {
            name: self.name.clone(),
            offset,
        }
    }

    /// Read the next rune, `None` at end of stream.
    ///
    /// A malformed or truncated sequence is a [`PasteError::Decode`].
    pub fn read_rune(&mut self) -> Result<Option<char>> {
        let start = self.offset;
        let Some(lead) = self.read_byte()? else {
            return Ok(None);
        };

        let len = sequence_len(lead).ok_or_else(|| self.decode_error(start))?;
        if len == 1 {
            return Ok(Some(char::from(lead)));
        }

        let mut buf = [0u8; 4];
        buf[0] = lead;
        for slot in buf.iter_mut().take(len).skip(1) {
            *slot = self.read_byte()?.ok_or_else(|| self.decode_error(start))?;
        }

        std::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| self.decode_error(start))
    }
}

/// Encodes runes onto a named byte sink
pub struct RuneWriter<W> {
    name: String,
    inner: W,
}

impl<W: Write> RuneWriter<W> {
    pub fn new(name: impl Into<String>, inner: W) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    /// Writer for standard output (or a stand-in for it)
    pub fn stdout(inner: W) -> Self {
        Self::new(STDOUT_NAME, inner)
    }

    fn write_error(&self, source: std::io::Error) -> PasteError {
        PasteError::Write {
            name: self.name.clone(),
            source,
        }
    }

    pub fn write_rune(&mut self, c: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.inner
            .write_all(c.encode_utf8(&mut buf).as_bytes())
            .map_err(|e| self.write_error(e))
    }

    /// Write a delimiter rune; NUL stands for the empty delimiter
    pub fn write_delimiter(&mut self, d: char) -> Result<()> {
        if d == '\0' {
            return Ok(());
        }
        self.write_rune(d)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(|e| self.write_error(e))
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
