use std::borrow::Cow;

use super::{Source, is_space};

/// A byte range `[start, stop)` into the [`Source`].
///
/// Parsed nodes store segments rather than copied text, so slicing the source
/// with any segment reproduces the exact input bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Segment {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive stop byte offset.
    pub stop: usize,
}

impl Segment {
    #[must_use]
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.stop.saturating_sub(self.start)
    }

    /// Returns true if the segment is empty (start >= stop).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Materializes the underlying text.
    #[must_use]
    pub fn value(self, source: &Source) -> Cow<'_, str> {
        source.slice(self)
    }

    /// Returns a copy with a different stop offset.
    #[must_use]
    pub fn with_stop(self, stop: usize) -> Self {
        Self { stop, ..self }
    }

    /// Drops leading whitespace (spaces, tabs, line endings).
    #[must_use]
    pub fn trim_left_space(self, source: &Source) -> Self {
        let text = self.value(source);
        let trimmed = text.len() - text.trim_start_matches(is_space).len();
        Self {
            start: self.start + trimmed,
            stop: self.stop,
        }
    }

    /// Drops trailing whitespace, including the line ending.
    #[must_use]
    pub fn trim_right_space(self, source: &Source) -> Self {
        let text = self.value(source);
        let trimmed = text.len() - text.trim_end_matches(is_space).len();
        Self {
            start: self.start,
            stop: self.stop - trimmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_empty() {
        assert_eq!(Segment::new(2, 7).len(), 5);
        assert!(Segment::new(4, 4).is_empty());
        assert!(Segment::new(5, 3).is_empty());
    }

    #[test]
    fn value_slices_source() {
        let source = Source::new("hello world");
        assert_eq!(Segment::new(6, 11).value(&source), "world");
    }

    #[test]
    fn trim_left_space_skips_spaces_and_tabs() {
        let source = Source::new(" \t  body\n");
        let seg = Segment::new(0, source.len()).trim_left_space(&source);
        assert_eq!(seg.start, 4);
        assert_eq!(seg.value(&source), "body\n");
    }

    #[test]
    fn trim_right_space_drops_line_ending() {
        let source = Source::new("Title   \r\n");
        let seg = Segment::new(0, source.len()).trim_right_space(&source);
        assert_eq!(seg.value(&source), "Title");
    }

    #[test]
    fn trimming_blank_segment_yields_empty() {
        let source = Source::new("   \n");
        let seg = Segment::new(0, source.len()).trim_left_space(&source);
        assert!(seg.is_empty());
    }
}
