//! Setext headings: a paragraph followed by a line of `=` or `-`.
//!
//! The underline is only recognized while a paragraph is open, so the parser
//! reaches back through the [`Context`] to claim that paragraph. The paragraph
//! is stashed when the underline opens and absorbed when the heading closes.

use crate::ast::{NodeId, NodeKind};
use crate::text::{Reader, is_space};

use super::block::{BlockParser, Children, State};
use super::context::{Context, ContextKey};
use super::heading::{HeadingConfig, finish_heading};

/// The paragraph a pending setext heading will absorb.
struct TemporaryParagraph;

impl ContextKey for TemporaryParagraph {
    type Value = NodeId;
}

/// Returns the underline character (`=` or `-`) when `line` is a setext bar.
///
/// At most three leading spaces; then one unbroken run of a single bar
/// character reaching the end of the line, ignoring trailing whitespace.
#[must_use]
pub fn matches_setext_bar(line: &str) -> Option<u8> {
    let bytes = line.as_bytes();
    let space = bytes.iter().take_while(|&&b| b == b' ').count();
    if space > 3 {
        return None;
    }
    let rest = &bytes[space..];
    let end = rest
        .iter()
        .rposition(|&b| !is_space(b as char))
        .map_or(0, |i| i + 1);

    let c = match rest.first() {
        Some(&c @ (b'=' | b'-')) => c,
        _ => return None,
    };
    let run = rest.iter().take_while(|&&b| b == c).count();
    (run == end).then_some(c)
}

#[derive(Debug, Default)]
pub struct SetextHeadingParser {
    config: HeadingConfig,
}

impl SetextHeadingParser {
    #[must_use]
    pub fn new(config: HeadingConfig) -> Self {
        Self { config }
    }
}

impl BlockParser for SetextHeadingParser {
    fn trigger(&self) -> Option<&[u8]> {
        Some(b"-=")
    }

    fn open(
        &self,
        parent: NodeId,
        reader: &mut Reader<'_>,
        pc: &mut Context,
    ) -> Option<(NodeId, Children)> {
        let last = pc.last_opened_block()?.node;
        let tree = pc.tree();
        if !tree.kind(last).is_paragraph() || tree.parent(last) != Some(parent) {
            return None;
        }
        let (line, seg) = reader.peek_line()?;
        let level = match matches_setext_bar(&line)? {
            b'=' => 1,
            _ => 2,
        };

        let tree = pc.tree_mut();
        let node = tree.new_node(NodeKind::Heading { level });
        tree.lines_mut(node).append(seg);
        pc.set::<TemporaryParagraph>(last);
        reader.advance(seg.len());
        Some((node, Children::Leaf))
    }

    fn continue_block(&self, _node: NodeId, _reader: &mut Reader<'_>, _pc: &mut Context) -> State {
        State::Reconsider
    }

    /// # Panics
    /// Panics if no paragraph was stashed by [`open`](Self::open) for this
    /// heading.
    fn close(&self, node: NodeId, reader: &Reader<'_>, pc: &mut Context) {
        let source = reader.source();
        let paragraph = pc
            .take::<TemporaryParagraph>()
            .expect("setext heading closed without a stashed paragraph");

        let tree = pc.tree_mut();
        let bar = tree.lines(node).at(0);
        tree.lines_mut(node).clear();

        if tree.lines(paragraph).is_empty() {
            // Nothing to underline: the bar becomes paragraph text instead.
            let bar = bar.trim_left_space(source);
            let parent = tree
                .parent(node)
                .expect("setext heading closed while detached");
            match tree.next_sibling(node) {
                Some(next) if tree.kind(next).is_paragraph() => tree.lines_mut(next).unshift(bar),
                _ => {
                    let para = tree.new_node(NodeKind::Paragraph);
                    tree.lines_mut(para).append(bar);
                    tree.insert_after(parent, node, para);
                }
            }
            tree.remove_child(parent, node);
            return;
        }

        let lines = tree.lines(paragraph).clone();
        let blank = tree.has_blank_previous_lines(paragraph);
        tree.set_lines(node, lines);
        tree.set_blank_previous_lines(node, blank);
        if let Some(parent) = tree.parent(paragraph) {
            tree.remove_child(parent, paragraph);
        }

        finish_heading(self.config, node, source, pc);
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }

    fn can_accept_indented_line(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("===\n", Some(b'='))]
    #[case("---", Some(b'-'))]
    #[case("   =\n", Some(b'='))]
    #[case("---  \t\r\n", Some(b'-'))]
    #[case("    ===", None)]
    #[case("=-=", None)]
    #[case("-- -", None)]
    #[case("==x", None)]
    #[case("\n", None)]
    #[case("", None)]
    fn bars(#[case] line: &str, #[case] expected: Option<u8>) {
        assert_eq!(matches_setext_bar(line), expected);
    }
}
