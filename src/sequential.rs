//! Sequential (serial) merging: one output record per input stream

use crate::delimiter::Delimiters;
use crate::error::Result;
use crate::rune::RuneWriter;
use crate::stream::Stream;
use std::io::{Read, Write};

/// Join the lines of each stream into a single record.
///
/// Streams are drained one after another, in order. Within a stream every
/// line break is replaced by the next delimiter of the cycle, which restarts
/// at the first delimiter for each stream. A stream's final newline is
/// written once, after its record; a stream that does not end in a newline
/// leaves its record unterminated.
pub fn merge<R: Read, W: Write>(
    streams: &mut [Stream<R>],
    delimiters: &Delimiters,
    out: &mut RuneWriter<W>,
) -> Result<()> {
    for stream in streams.iter_mut() {
        let lines = merge_record(stream, delimiters, out)?;
        log::trace!("{}: joined {} line(s)", stream.name(), lines);
    }
    Ok(())
}

/// Write one stream as a record, returning the number of lines joined
fn merge_record<R: Read, W: Write>(
    stream: &mut Stream<R>,
    delimiters: &Delimiters,
    out: &mut RuneWriter<W>,
) -> Result<usize> {
    let mut slot = 0;
    let mut last = None;

    while let Some(c) = stream.read_rune()? {
        if last == Some('\n') {
            out.write_delimiter(delimiters.get(slot))?;
            slot += 1;
        }
        if c != '\n' {
            out.write_rune(c)?;
        }
        last = Some(c);
    }

    match last {
        Some('\n') => {
            out.write_rune('\n')?;
            Ok(slot + 1)
        }
        Some(_) => Ok(slot + 1),
        None => Ok(0),
    }
}
