use crate::text::Source;

use super::{Ast, NodeId, NodeKind};

/// Validates tree invariants below `node`.
///
/// Asserts that:
/// - every line segment and text segment lies within the source
/// - each node's lines are in source order and do not overlap
/// - parent, child and sibling links agree with each other
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(ast: &Ast, source: &Source, node: NodeId) {
    let n = source.len();
    let lines = ast.lines(node);
    for seg in lines.iter() {
        assert!(
            seg.start <= seg.stop && seg.stop <= n,
            "line segment out of bounds: {seg:?} (source len: {n})"
        );
    }
    for pair in lines.iter().collect::<Vec<_>>().windows(2) {
        assert!(
            pair[0].stop <= pair[1].start,
            "lines out of order or overlapping: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }
    if let NodeKind::Text { segment, .. } = ast.kind(node) {
        assert!(
            segment.start <= segment.stop && segment.stop <= n,
            "text segment out of bounds: {segment:?} (source len: {n})"
        );
    }

    let mut prev = None;
    for child in ast.children(node) {
        assert_eq!(ast.parent(child), Some(node), "child {child:?} has a stale parent link");
        assert_eq!(ast.prev_sibling(child), prev, "broken prev link on {child:?}");
        prev = Some(child);
        check(ast, source, child);
    }
    assert_eq!(ast.last_child(node), prev, "broken last-child link on {node:?}");
}
