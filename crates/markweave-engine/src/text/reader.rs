use std::borrow::Cow;

use super::{Source, segment::Segment};

/// A line-oriented cursor over a [`Source`].
///
/// The reader sits on one physical line at a time. Container parsers consume
/// their prefix with [`Reader::advance`], so later parsers only see the
/// remainder of the line.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    source: &'a Source,
    /// Index of the current line in `source.lines()`.
    line: usize,
    /// Absolute byte position inside the current line.
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(source: &'a Source) -> Self {
        let pos = source.lines().first().map_or(0, |l| l.start);
        Self {
            source,
            line: 0,
            pos,
        }
    }

    #[must_use]
    pub fn source(&self) -> &'a Source {
        self.source
    }

    /// Zero-based index of the current line.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Returns true once every line has been consumed.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.line >= self.source.lines().len()
    }

    /// The unconsumed remainder of the current line (newline included) and its segment.
    #[must_use]
    pub fn peek_line(&self) -> Option<(Cow<'a, str>, Segment)> {
        let line = self.source.lines().get(self.line)?;
        let seg = Segment::new(self.pos, line.stop);
        Some((self.source.slice(seg), seg))
    }

    /// Consumes `n` bytes of the current line, never moving past its end.
    pub fn advance(&mut self, n: usize) {
        if let Some(line) = self.source.lines().get(self.line) {
            self.pos = (self.pos + n).min(line.stop);
        }
    }

    /// Moves to the start of the next line.
    pub fn advance_line(&mut self) {
        self.line += 1;
        self.pos = self
            .source
            .lines()
            .get(self.line)
            .map_or(self.source.len(), |l| l.start);
    }
}
