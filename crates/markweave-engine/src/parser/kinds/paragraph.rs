use crate::ast::{NodeId, NodeKind};
use crate::parser::block::{BlockParser, Children, State};
use crate::parser::context::Context;
use crate::text::{Reader, is_blank};

/// Paragraphs have no delimiters. They are the default leaf block when no
/// other block opener matches, so this parser should be registered last.
#[derive(Debug, Default)]
pub struct ParagraphParser;

impl ParagraphParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BlockParser for ParagraphParser {
    fn open(
        &self,
        _parent: NodeId,
        reader: &mut Reader<'_>,
        pc: &mut Context,
    ) -> Option<(NodeId, Children)> {
        let (line, seg) = reader.peek_line()?;
        if is_blank(&line) {
            return None;
        }
        let seg = seg.trim_left_space(reader.source());
        let tree = pc.tree_mut();
        let node = tree.new_node(NodeKind::Paragraph);
        tree.lines_mut(node).append(seg);
        reader.advance(line.len());
        Some((node, Children::Leaf))
    }

    fn continue_block(&self, node: NodeId, reader: &mut Reader<'_>, pc: &mut Context) -> State {
        let Some((line, seg)) = reader.peek_line() else {
            return State::Close;
        };
        if is_blank(&line) {
            return State::Close;
        }
        let seg = seg.trim_left_space(reader.source());
        pc.tree_mut().lines_mut(node).append(seg);
        reader.advance(line.len());
        State::Continue(Children::Leaf)
    }

    fn close(&self, node: NodeId, reader: &Reader<'_>, pc: &mut Context) {
        let tree = pc.tree_mut();
        let lines = tree.lines_mut(node);
        if let Some(last) = lines.last() {
            let index = lines.len() - 1;
            lines.set(index, last.trim_right_space(reader.source()));
            return;
        }
        if let Some(parent) = tree.parent(node) {
            tree.remove_child(parent, node);
        }
    }

    fn can_interrupt_paragraph(&self) -> bool {
        false
    }

    fn can_accept_indented_line(&self) -> bool {
        true
    }
}
