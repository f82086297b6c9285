//! Input stream descriptors

use crate::error::{PasteError, Result};
use crate::rune::RuneReader;
use std::fs;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Operand naming standard input
pub const STDIN_OPERAND: &str = "-";

/// A readable input: a buffered file or the process's standard input
///
/// Every `Stdin` variant shares the one process-wide handle, so naming `-`
/// several times interleaves reads from it. Dropping a `Source` closes files
/// but never standard input.
pub enum Source {
    Stdin(io::Stdin),
    File(BufReader<fs::File>),
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Stdin(stdin) => stdin.read(buf),
            Source::File(file) => file.read(buf),
        }
    }
}

/// One input operand: its diagnostic name plus a rune reader over it
pub struct Stream<R> {
    runes: RuneReader<R>,
}

impl<R: Read> Stream<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            runes: RuneReader::new(name, reader),
        }
    }

    pub fn name(&self) -> &str {
        self.runes.name()
    }

    /// Next rune of this stream, `None` once exhausted
    pub fn read_rune(&mut self) -> Result<Option<char>> {
        self.runes.read_rune()
    }
}

impl Stream<Source> {
    /// Open an operand for reading; `-` selects standard input
    pub fn open(operand: &str) -> Result<Self> {
        let source = if operand == STDIN_OPERAND {
            Source::Stdin(io::stdin())
        } else {
            let file = fs::File::open(Path::new(operand)).map_err(|source| PasteError::Open {
                name: operand.to_string(),
                source,
            })?;
            Source::File(BufReader::new(file))
        };

        log::debug!("opened input {}", operand);
        Ok(Self::new(operand, source))
    }

    /// Open every operand up front; the first failure aborts
    pub fn open_all<S: AsRef<str>>(operands: &[S]) -> Result<Vec<Self>> {
        operands.iter().map(|op| Self::open(op.as_ref())).collect()
    }
}
