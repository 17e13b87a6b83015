//! Line-oriented literal matcher over one file's decoded contents.
//!
//! A [`Finder`] owns the file's text as a flat sequence of code points and
//! hands it out line by line: each [`Finder::next_line`] call consumes one
//! line, reporting every non-overlapping occurrence of the search term on
//! it. The cursor only ever moves forward, so a whole file costs O(buffer
//! length) regardless of how many matches it contains.

/// A half-open `[start, end)` range of code-point indices identifying one
/// occurrence of the search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Stateful line tokenizer and literal matcher.
///
/// One `Finder` serves exactly one file: create it from the decoded
/// contents, call [`next_line`](Self::next_line) until it signals end of
/// input, then drop it. Indices reported through [`Span`] and the
/// accessors all count code points, never bytes, so multi-byte characters
/// are never split mid-match.
#[derive(Debug)]
pub struct Finder {
    buffer: Vec<char>,
    line: usize,
    cursor: usize,
    bol: usize,
}

impl Finder {
    pub fn new(contents: &str) -> Self {
        Self {
            buffer: contents.chars().collect(),
            line: 1,
            cursor: 0,
            bol: 0,
        }
    }

    /// Consumes the current line and returns the term occurrences found on
    /// it, plus whether the buffer is now exhausted.
    ///
    /// Matching is literal and case-sensitive. Occurrences are reported
    /// left to right and never overlap: after a hit, scanning resumes at
    /// the hit's end. Once the remaining buffer is shorter than the term
    /// nothing further can match, so the call stops there and reports the
    /// buffer exhausted; matches already found on the line are still
    /// returned. Calling again after exhaustion is a no-op.
    pub fn next_line(&mut self, term: &[char]) -> (Vec<Span>, bool) {
        debug_assert!(!term.is_empty(), "search term must not be empty");
        let len = self.buffer.len();
        if self.cursor >= len {
            return (Vec::new(), true);
        }
        let mut spans = Vec::new();
        while self.cursor < len && self.buffer[self.cursor] != '\n' {
            let end = self.cursor + term.len();
            if end > len {
                // Tail shorter than the term. Park bol one past the
                // virtual line end so the caller's display slice
                // [bol_snapshot, bol - 1) still covers the whole tail.
                self.cursor = len;
                self.bol = len + 1;
                return (spans, true);
            }
            if self.buffer[self.cursor..end] == *term {
                spans.push(Span {
                    start: self.cursor,
                    end,
                });
                self.cursor = end;
            } else {
                self.cursor += 1;
            }
        }
        self.line += 1;
        self.cursor += 1;
        self.bol = self.cursor;
        (spans, false)
    }

    /// Exact substring between two code-point indices.
    ///
    /// Callers must only pass indices derived from this finder's own spans
    /// and accessors; out-of-range indices panic.
    pub fn read_range(&self, start: usize, end: usize) -> String {
        self.buffer[start..end].iter().collect()
    }

    /// 1-based number of the line the cursor currently sits in.
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Index of the first code point of the current line.
    pub fn bol(&self) -> usize {
        self.bol
    }

    /// Index of the next unexamined code point.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
