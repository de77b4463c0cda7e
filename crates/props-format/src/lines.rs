//! Physical and logical line readers.
//!
//! A logical line is one key/value statement: comments and blank lines are
//! dropped here, and backslash-newline continuations are joined before the
//! parser sees the text.

use crate::is_whitespace;

/// Splits text on `\n`, `\r\n` or a lone `\r`.
///
/// Yields `(line_number, text)` with 1-based line numbers and the terminator
/// removed.
pub(crate) struct PhysicalLines<'a> {
    rest: &'a str,
    number: usize,
    done: bool,
}

impl<'a> PhysicalLines<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            number: 0,
            done: text.is_empty(),
        }
    }
}

impl<'a> Iterator for PhysicalLines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.number += 1;

        match self.rest.find(&['\n', '\r'][..]) {
            Some(pos) => {
                let line = &self.rest[..pos];
                let skip = if self.rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[pos + skip..];
                // A terminator at the very end does not open another line
                if self.rest.is_empty() {
                    self.done = true;
                }
                Some((self.number, line))
            }
            None => {
                self.done = true;
                Some((self.number, self.rest))
            }
        }
    }
}

/// A key/value statement assembled from one or more physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogicalLine {
    /// Line number of the first physical line.
    pub number: usize,
    /// Joined text, leading whitespace stripped, escapes still encoded.
    pub text: String,
}

pub(crate) struct LogicalLines<'a> {
    physical: PhysicalLines<'a>,
}

impl<'a> LogicalLines<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            physical: PhysicalLines::new(text),
        }
    }
}

impl<'a> Iterator for LogicalLines<'a> {
    type Item = LogicalLine;

    fn next(&mut self) -> Option<LogicalLine> {
        loop {
            let (number, line) = self.physical.next()?;
            let line = line.trim_start_matches(is_whitespace);

            // Comments end at their physical line, continuation or not
            if line.is_empty() || line.starts_with(&['#', '!'][..]) {
                continue;
            }

            let mut text = String::from(line);
            while is_continued(&text) {
                text.pop();
                match self.physical.next() {
                    Some((_, next)) => text.push_str(next.trim_start_matches(is_whitespace)),
                    None => break,
                }
            }

            return Some(LogicalLine { number, text });
        }
    }
}

/// True when the text ends in an odd number of backslashes.
fn is_continued(text: &str) -> bool {
    text.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}
