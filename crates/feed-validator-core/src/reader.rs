//! Line reassembly for feeds
//!
//! Some producers emit U+2028 (LINE SEPARATOR) or U+2029 (PARAGRAPH
//! SEPARATOR) unescaped inside JSON strings. Readers that honour Unicode line
//! boundaries split a record there, so [`PhysicalLines`] breaks the stream at
//! `\n` and at both separators, and [`LogicalLines`] glues every fragment that
//! ends in a separator back onto the fragment that follows it.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::error::{FeedError, Result};

pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';

fn is_problem_separator(c: char) -> bool {
    c == LINE_SEPARATOR || c == PARAGRAPH_SEPARATOR
}

/// Physical lines of a UTF-8 stream, terminators included.
///
/// A line ends at `\n`, U+2028 or U+2029. Invalid UTF-8 yields
/// [`FeedError::Encoding`] and ends the sequence; so does any other read
/// failure, as [`FeedError::FileError`].
pub struct PhysicalLines<R> {
    reader: R,
    buf: Vec<u8>,
    pending: VecDeque<String>,
    done: bool,
}

impl<R: BufRead> PhysicalLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    fn queue_segments(&mut self, chunk: &str) {
        let mut start = 0;
        for (idx, c) in chunk.char_indices() {
            if is_problem_separator(c) {
                let end = idx + c.len_utf8();
                self.pending.push_back(chunk[start..end].to_string());
                start = end;
            }
        }
        if start < chunk.len() {
            self.pending.push_back(chunk[start..].to_string());
        }
    }
}

impl<R: BufRead> Iterator for PhysicalLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(line) = self.pending.pop_front() {
            return Some(Ok(line));
        }
        if self.done {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                let decoded = std::str::from_utf8(&self.buf).map(str::to_owned);
                match decoded {
                    Ok(chunk) => {
                        self.queue_segments(&chunk);
                        self.pending.pop_front().map(Ok)
                    }
                    Err(e) => {
                        self.done = true;
                        Some(Err(FeedError::encoding(e.to_string())))
                    }
                }
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

/// Logical records reassembled from physical lines.
///
/// Fragments ending in U+2028 or U+2029 are joined with the next fragment.
/// The trailing `\n` (or `\r\n`) is stripped from each yielded line. A final
/// fragment without a terminator is still yielded when non-empty. Errors from
/// the underlying sequence are passed through once and end iteration.
pub struct LogicalLines<I> {
    inner: I,
    done: bool,
}

impl<I> LogicalLines<I>
where
    I: Iterator<Item = Result<String>>,
{
    pub fn new(inner: I) -> Self {
        Self { inner, done: false }
    }
}

impl<I> Iterator for LogicalLines<I>
where
    I: Iterator<Item = Result<String>>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut record = String::new();
        loop {
            match self.inner.next() {
                None => {
                    self.done = true;
                    return (!record.is_empty()).then(|| Ok(strip_terminator(record)));
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(fragment)) => {
                    record.push_str(&fragment);
                    if record.ends_with(is_problem_separator) {
                        continue;
                    }
                    return Some(Ok(strip_terminator(record)));
                }
            }
        }
    }
}

fn strip_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Logical lines of a buffered UTF-8 reader
pub fn logical_lines<R: BufRead>(reader: R) -> LogicalLines<PhysicalLines<R>> {
    LogicalLines::new(PhysicalLines::new(reader))
}
