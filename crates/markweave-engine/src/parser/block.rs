use std::fmt::Debug;

use crate::ast::NodeId;
use crate::text::Reader;

use super::context::Context;

/// Whether an opened block may contain child blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Children {
    /// A container: later lines may open nested blocks inside it.
    Allowed,
    /// A leaf: the block only ever owns lines.
    Leaf,
}

/// What an open block wants to do with the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The block accepts the line and stays open.
    Continue(Children),
    /// The line was the block's last and has been consumed.
    Close,
    /// The block ends before this line; offer the line to other parsers.
    Reconsider,
}

/// One block-recognition rule.
///
/// The driver calls [`open`](Self::open) on candidate lines in priority
/// order, then [`continue_block`](Self::continue_block) on each subsequent
/// line while the block stays open, and [`close`](Self::close) exactly once
/// when its extent is known. The driver attaches the node returned by `open`
/// under the given parent; parsers only create it.
pub trait BlockParser: Debug + Send + Sync {
    /// First non-space bytes this parser can start on. `None` means any line.
    fn trigger(&self) -> Option<&[u8]> {
        None
    }

    /// Tries to start a block at the reader's current line.
    ///
    /// On a match the parser advances the reader past what it consumed.
    /// Returning `None` must leave the reader where it was.
    fn open(
        &self,
        parent: NodeId,
        reader: &mut Reader<'_>,
        pc: &mut Context,
    ) -> Option<(NodeId, Children)>;

    fn continue_block(&self, node: NodeId, reader: &mut Reader<'_>, pc: &mut Context) -> State;

    /// Finalizes the block. May rewrite the node's lines and attributes or
    /// move it in the tree.
    fn close(&self, node: NodeId, reader: &Reader<'_>, pc: &mut Context);

    fn can_interrupt_paragraph(&self) -> bool;

    /// When false the driver skips this parser on lines indented by four or
    /// more columns.
    fn can_accept_indented_line(&self) -> bool;
}
