use crate::ast::{NodeId, NodeKind};
use crate::parser::block::{BlockParser, Children, State};
use crate::parser::context::Context;
use crate::text::{Reader, indent_width};

/// Blockquote syntax knowledge lives here.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: u8 = b'>';

    /// Matches one `>` marker, returning how many bytes of `s` it covers.
    ///
    /// Up to three spaces of indentation may precede the marker and one
    /// optional space after it belongs to the marker.
    pub fn strip_prefix(s: &str) -> Option<usize> {
        let (indent, mut i) = indent_width(s);
        let b = s.as_bytes();
        if indent > 3 || b.get(i) != Some(&Self::PREFIX) {
            return None;
        }
        i += 1;
        if b.get(i) == Some(&b' ') {
            i += 1;
        }
        Some(i)
    }
}

/// Container for `>`-prefixed lines. Each level of nesting is its own block.
#[derive(Debug, Default)]
pub struct BlockQuoteParser;

impl BlockQuoteParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BlockParser for BlockQuoteParser {
    fn trigger(&self) -> Option<&[u8]> {
        Some(b">")
    }

    fn open(
        &self,
        _parent: NodeId,
        reader: &mut Reader<'_>,
        pc: &mut Context,
    ) -> Option<(NodeId, Children)> {
        let (line, _) = reader.peek_line()?;
        let consumed = BlockQuote::strip_prefix(&line)?;
        reader.advance(consumed);
        Some((pc.tree_mut().new_node(NodeKind::BlockQuote), Children::Allowed))
    }

    fn continue_block(&self, _node: NodeId, reader: &mut Reader<'_>, _pc: &mut Context) -> State {
        let Some((line, _)) = reader.peek_line() else {
            return State::Reconsider;
        };
        match BlockQuote::strip_prefix(&line) {
            Some(consumed) => {
                reader.advance(consumed);
                State::Continue(Children::Allowed)
            }
            None => State::Reconsider,
        }
    }

    fn close(&self, _node: NodeId, _reader: &Reader<'_>, _pc: &mut Context) {}

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }

    fn can_accept_indented_line(&self) -> bool {
        false
    }
}
