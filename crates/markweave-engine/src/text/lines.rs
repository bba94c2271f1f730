use super::{Source, segment::Segment};

/// Ordered line segments owned by one tree node.
///
/// Segments are kept in source order; callers that insert out of order
/// (`unshift`) are responsible for keeping it that way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lines(Vec<Segment>);

impl Lines {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, seg: Segment) {
        self.0.push(seg);
    }

    /// Inserts a segment before the first one.
    pub fn unshift(&mut self, seg: Segment) {
        self.0.insert(0, seg);
    }

    /// Replaces the segment at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, seg: Segment) {
        self.0[index] = seg;
    }

    /// # Panics
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn at(&self, index: usize) -> Segment {
        self.0[index]
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Segment> {
        self.0.get(index).copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<Segment> {
        self.0.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Segment> + '_ {
        self.0.iter().copied()
    }

    /// Concatenates the raw text of every line.
    #[must_use]
    pub fn value(&self, source: &Source) -> String {
        self.iter().map(|seg| seg.value(source)).collect()
    }
}

impl FromIterator<Segment> for Lines {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unshift_puts_segment_first() {
        let mut lines: Lines = [Segment::new(4, 8)].into_iter().collect();
        lines.unshift(Segment::new(0, 4));
        assert_eq!(lines.at(0), Segment::new(0, 4));
        assert_eq!(lines.last(), Some(Segment::new(4, 8)));
    }

    #[test]
    fn value_joins_raw_lines() {
        let source = Source::new("one\ntwo\n");
        let lines: Lines = source.lines().iter().copied().collect();
        assert_eq!(lines.value(&source), "one\ntwo\n");
    }

    #[test]
    fn clear_empties_collection() {
        let mut lines = Lines::new();
        lines.append(Segment::new(0, 1));
        lines.clear();
        assert!(lines.is_empty());
        assert_eq!(lines.get(0), None);
    }
}
