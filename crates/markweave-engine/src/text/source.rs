use std::borrow::Cow;
use std::fmt;

use xi_rope::Rope;

use super::segment::Segment;

/// The immutable text of one document.
///
/// The rope is the single source of truth; parsing only ever produces
/// [`Segment`]s into it. Line boundaries are indexed once on construction.
#[derive(Clone)]
pub struct Source {
    rope: Rope,
    lines: Vec<Segment>,
}

impl Source {
    pub fn new(text: &str) -> Self {
        let rope = Rope::from(text);
        let lines = line_segments(&rope).collect();
        Self { rope, lines }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rope.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extracts the text for a segment. Borrows when the segment lies in a
    /// single rope leaf, allocates otherwise.
    #[must_use]
    pub fn slice(&self, seg: Segment) -> Cow<'_, str> {
        self.rope.slice_to_cow(seg.start..seg.stop)
    }

    /// Physical lines, each including its newline if present.
    #[must_use]
    pub fn lines(&self) -> &[Segment] {
        &self.lines
    }

    #[must_use]
    pub fn rope(&self) -> &Rope {
        &self.rope
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("len", &self.len())
            .field("lines", &self.lines.len())
            .finish()
    }
}

/// Uses `lines_raw` to keep newline characters, so consecutive segments tile
/// the whole rope without gaps.
fn line_segments(rope: &Rope) -> impl Iterator<Item = Segment> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        offset += line.len();
        Segment::new(start, offset)
    })
}

/// Extracts text for a segment, truncating to `max` bytes with "..." suffix if needed.
///
/// Used for human-readable tree dumps.
pub fn preview(source: &Source, seg: Segment, max: usize) -> String {
    let mut s = source.slice(seg).into_owned();
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_tile_the_source() {
        let source = Source::new("a\nbc\n\nd");
        assert_eq!(
            source.lines(),
            &[
                Segment::new(0, 2),
                Segment::new(2, 5),
                Segment::new(5, 6),
                Segment::new(6, 7),
            ]
        );
    }

    #[test]
    fn empty_source_has_no_lines() {
        let source = Source::new("");
        assert!(source.is_empty());
        assert!(source.lines().is_empty());
    }

    #[test]
    fn preview_short_text_unchanged() {
        let source = Source::new("hello");
        assert_eq!(preview(&source, Segment::new(0, 5), 10), "hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        let source = Source::new("hello world");
        assert_eq!(preview(&source, Segment::new(0, 11), 5), "hello...");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let source = Source::new("héllo");
        assert_eq!(preview(&source, Segment::new(0, 6), 2), "h...");
    }
}
