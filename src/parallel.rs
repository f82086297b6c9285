//! Parallel merging: one output line per round, one field per stream
//!
//! Each round takes the next line of every stream and writes them as the
//! fields of a single output line. Field `i` is followed by delimiter `i` of
//! the cycle, the last field by a newline. A stream that has run out still
//! occupies its field (empty), so columns stay aligned; the merge ends with
//! the first round to which no stream contributes anything.

use crate::delimiter::Delimiters;
use crate::error::Result;
use crate::rune::RuneWriter;
use crate::stream::Stream;
use std::io::{Read, Write};
use std::ops::Range;

/// Progress of one stream's field within the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Runes are still being copied
    Reading,
    /// The line ended, by newline or by end of stream after some content
    LineComplete,
    /// No rune was available at all
    Exhausted,
}

/// Per-round bookkeeping: the last field index whose output has been written.
///
/// Fields before the first contributing stream are written lazily; when a
/// later stream produces its first rune, the delimiters of every skipped
/// field are caught up before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundCursor {
    last: Option<usize>,
}

impl RoundCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any field of this round has produced output
    pub fn has_output(&self) -> bool {
        self.last.is_some()
    }

    /// Field `index` has already been opened in this round
    pub fn is_open(&self, index: usize) -> bool {
        self.last == Some(index)
    }

    /// Field slots before `index` whose delimiters are still owed
    pub fn pending(&self, index: usize) -> Range<usize> {
        let start = self.last.map_or(0, |last| last + 1);
        start..index.max(start)
    }

    /// Mark field `index` as written
    pub fn advance(&mut self, index: usize) {
        self.last = Some(index);
    }
}

/// Write delimiters for skipped fields and mark `index` as open
fn open_field<W: Write>(
    cursor: &mut RoundCursor,
    index: usize,
    delimiters: &Delimiters,
    out: &mut RuneWriter<W>,
) -> Result<()> {
    for slot in cursor.pending(index) {
        out.write_delimiter(delimiters.get(slot))?;
    }
    cursor.advance(index);
    Ok(())
}

/// Copy one line of `stream` as field `index`, without its terminator
fn read_field<R: Read, W: Write>(
    stream: &mut Stream<R>,
    index: usize,
    cursor: &mut RoundCursor,
    delimiters: &Delimiters,
    out: &mut RuneWriter<W>,
) -> Result<FieldState> {
    let mut state = FieldState::Reading;

    while state == FieldState::Reading {
        state = match stream.read_rune()? {
            Some(c) => {
                if !cursor.is_open(index) {
                    open_field(cursor, index, delimiters, out)?;
                }
                if c == '\n' {
                    FieldState::LineComplete
                } else {
                    out.write_rune(c)?;
                    FieldState::Reading
                }
            }
            None if cursor.is_open(index) => FieldState::LineComplete,
            None => FieldState::Exhausted,
        };
    }

    Ok(state)
}

/// Write what follows field `index`: its delimiter, or a newline after the last field
fn close_field<W: Write>(
    index: usize,
    count: usize,
    delimiters: &Delimiters,
    out: &mut RuneWriter<W>,
) -> Result<()> {
    if index + 1 == count {
        out.write_rune('\n')
    } else {
        out.write_delimiter(delimiters.get(index))
    }
}

/// Run one round over all streams; returns whether anything was written
fn merge_round<R: Read, W: Write>(
    streams: &mut [Stream<R>],
    exhausted: &mut [bool],
    delimiters: &Delimiters,
    out: &mut RuneWriter<W>,
) -> Result<bool> {
    let count = streams.len();
    let mut cursor = RoundCursor::new();

    for (index, stream) in streams.iter_mut().enumerate() {
        let state = if exhausted[index] {
            FieldState::Exhausted
        } else {
            read_field(stream, index, &mut cursor, delimiters, out)?
        };

        match state {
            FieldState::LineComplete => {
                close_field(index, count, delimiters, out)?;
            }
            FieldState::Exhausted => {
                if !exhausted[index] {
                    log::trace!("{}: exhausted", stream.name());
                    exhausted[index] = true;
                }
                // Leading empty fields are caught up by the next contributor
                if cursor.has_output() {
                    close_field(index, count, delimiters, out)?;
                    cursor.advance(index);
                }
            }
            FieldState::Reading => unreachable!("read_field returns a finished field"),
        }
    }

    Ok(cursor.has_output())
}

/// Merge corresponding lines of all streams until every stream is exhausted
pub fn merge<R: Read, W: Write>(
    streams: &mut [Stream<R>],
    delimiters: &Delimiters,
    out: &mut RuneWriter<W>,
) -> Result<()> {
    let mut exhausted = vec![false; streams.len()];
    let mut rounds = 0usize;

    while merge_round(streams, &mut exhausted, delimiters, out)? {
        rounds += 1;
    }

    log::trace!("parallel merge wrote {} line(s)", rounds);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn streams_of<'a>(inputs: &[&'a str]) -> Vec<Stream<Cursor<&'a [u8]>>> {
        inputs
            .iter()
            .enumerate()
            .map(|(i, text)| Stream::new(format!("in{}", i), Cursor::new(text.as_bytes())))
            .collect()
    }

    fn paste_parallel(inputs: &[&str], delims: &str) -> String {
        let delimiters = Delimiters::parse(delims).unwrap();
        let mut streams = streams_of(inputs);
        let mut out = RuneWriter::stdout(Vec::new());
        merge(&mut streams, &delimiters, &mut out).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    // RoundCursor transitions

    #[test]
    fn test_cursor_fresh_round() {
        let cursor = RoundCursor::new();
        assert!(!cursor.has_output());
        assert!(!cursor.is_open(0));
        assert_eq!(cursor.pending(0), 0..0);
        assert_eq!(cursor.pending(3), 0..3);
    }

    #[test]
    fn test_cursor_advance_opens_field() {
        let mut cursor = RoundCursor::new();
        cursor.advance(0);
        assert!(cursor.has_output());
        assert!(cursor.is_open(0));
        assert!(!cursor.is_open(1));
        assert_eq!(cursor.pending(1), 1..1);
    }

    #[test]
    fn test_cursor_pending_after_gap() {
        let mut cursor = RoundCursor::new();
        cursor.advance(1);
        assert_eq!(cursor.pending(4), 2..4);
        assert!(cursor.pending(1).is_empty());
        assert!(cursor.pending(0).is_empty());
    }

    #[test]
    fn test_read_field_states() {
        let delimiters = Delimiters::default();
        let mut out = RuneWriter::stdout(Vec::new());
        let mut stream = Stream::new("s", Cursor::new(&b"ab\nc"[..]));

        let mut cursor = RoundCursor::new();
        let state = read_field(&mut stream, 0, &mut cursor, &delimiters, &mut out).unwrap();
        assert_eq!(state, FieldState::LineComplete);

        let mut cursor = RoundCursor::new();
        let state = read_field(&mut stream, 0, &mut cursor, &delimiters, &mut out).unwrap();
        assert_eq!(state, FieldState::LineComplete);

        let mut cursor = RoundCursor::new();
        let state = read_field(&mut stream, 0, &mut cursor, &delimiters, &mut out).unwrap();
        assert_eq!(state, FieldState::Exhausted);
        assert!(!cursor.has_output());

        assert_eq!(out.into_inner(), b"abc");
    }

    #[test]
    fn test_read_field_catches_up_skipped_fields() {
        let delimiters = Delimiters::parse(",;:").unwrap();
        let mut out = RuneWriter::stdout(Vec::new());
        let mut stream = Stream::new("s", Cursor::new(&b"z\n"[..]));
        let mut cursor = RoundCursor::new();

        read_field(&mut stream, 2, &mut cursor, &delimiters, &mut out).unwrap();
        assert!(cursor.is_open(2));
        assert_eq!(out.into_inner(), b",;z");
    }

    #[test]
    fn test_read_field_empty_line_still_opens() {
        let delimiters = Delimiters::default();
        let mut out = RuneWriter::stdout(Vec::new());
        let mut stream = Stream::new("s", Cursor::new(&b"\n"[..]));
        let mut cursor = RoundCursor::new();

        let state = read_field(&mut stream, 1, &mut cursor, &delimiters, &mut out).unwrap();
        assert_eq!(state, FieldState::LineComplete);
        assert!(cursor.has_output());
        assert_eq!(out.into_inner(), b"\t");
    }

    // Whole merges

    #[test]
    fn test_single_lines_joined_by_tab() {
        assert_eq!(paste_parallel(&["a\n", "b\n", "c\n"], r"\t"), "a\tb\tc\n");
    }

    #[test]
    fn test_single_stream_passthrough() {
        assert_eq!(paste_parallel(&["a\nb\n"], r"\t"), "a\nb\n");
    }

    #[test]
    fn test_empty_middle_stream_keeps_field() {
        assert_eq!(paste_parallel(&["line1\n", "", "line3\n"], r"\t"), "line1\t\tline3\n");
    }

    #[test]
    fn test_first_stream_exhausted_first() {
        assert_eq!(paste_parallel(&["", "b\n", "c\n"], ","), ",b,c\n");
        assert_eq!(paste_parallel(&["", "b\n"], ","), ",b\n");
    }

    #[test]
    fn test_only_last_stream_left() {
        assert_eq!(paste_parallel(&["", "", "z\n"], ",;"), ",;z\n");
    }

    #[test]
    fn test_trailing_streams_exhausted() {
        assert_eq!(paste_parallel(&["a\n", "", ""], ","), "a,,\n");
    }

    #[test]
    fn test_unequal_lengths() {
        let out = paste_parallel(&["1\n2\n", "a\n", "x\ny\nz\n"], r"\t");
        assert_eq!(out, "1\ta\tx\n2\t\ty\n\t\tz\n");
    }

    #[test]
    fn test_first_stream_runs_out_later() {
        let out = paste_parallel(&["a\n", "1\n2\n3\n"], ",");
        assert_eq!(out, "a,1\n,2\n,3\n");
    }

    #[test]
    fn test_delimiters_cycle_across_fields() {
        let out = paste_parallel(&["a\n", "b\n", "c\n", "d\n", "e\n"], ",;");
        assert_eq!(out, "a,b;c,d;e\n");
    }

    #[test]
    fn test_catch_up_uses_cycle_slots() {
        let out = paste_parallel(&["", "", "", "d\n"], ",;:");
        assert_eq!(out, ",;:d\n");
    }

    #[test]
    fn test_all_streams_empty_terminates() {
        assert_eq!(paste_parallel(&["", "", ""], r"\t"), "");
        assert_eq!(paste_parallel(&[""], r"\t"), "");
    }

    #[test]
    fn test_missing_final_newline_completes_field() {
        assert_eq!(paste_parallel(&["a", "b"], ","), "a,b\n");
        assert_eq!(paste_parallel(&["a\nb", "1\n2\n"], ","), "a,1\nb,2\n");
    }

    #[test]
    fn test_empty_lines_are_fields() {
        assert_eq!(paste_parallel(&["\n\n", "x\ny\n"], ","), ",x\n,y\n");
    }

    #[test]
    fn test_nul_delimiter_is_empty() {
        let delimiters = Delimiters::build(b"\0").unwrap();
        let mut streams = streams_of(&["a\n", "b\n"]);
        let mut out = RuneWriter::stdout(Vec::new());
        merge(&mut streams, &delimiters, &mut out).unwrap();
        assert_eq!(out.into_inner(), b"ab\n");
    }

    #[test]
    fn test_multibyte_fields() {
        assert_eq!(paste_parallel(&["日\n", "本\n"], "・"), "日・本\n");
    }

    #[test]
    fn test_read_error_aborts() {
        let delimiters = Delimiters::default();
        let mut streams = vec![
            Stream::new("good", Cursor::new(&b"a\nb\n"[..])),
            Stream::new("bad", Cursor::new(&b"1\n\xfe\n"[..])),
        ];
        let mut out = RuneWriter::stdout(Vec::new());
        let err = merge(&mut streams, &delimiters, &mut out).unwrap_err();
        assert!(err.to_string().starts_with("bad: invalid UTF-8"));
        assert_eq!(out.into_inner(), b"a\t1\nb\t");
    }
}
