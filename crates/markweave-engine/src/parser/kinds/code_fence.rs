use crate::ast::{FenceKind, NodeId, NodeKind};
use crate::parser::block::{BlockParser, Children, State};
use crate::parser::context::{Context, ContextKey};
use crate::text::{Reader, Segment, indent_width, is_blank};

/// An opening or closing fence: which character and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub len: usize,
}

/// Fence syntax knowledge lives here.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: u8 = b'`';
    pub const TILDE: u8 = b'~';
    pub const MIN_LEN: usize = 3;

    /// Detects a fence at the start of `remainder` (no leading spaces).
    pub fn sig(remainder: &str) -> Option<FenceSig> {
        let (c, kind) = match *remainder.as_bytes().first()? {
            Self::BACKTICK => (Self::BACKTICK, FenceKind::Backticks),
            Self::TILDE => (Self::TILDE, FenceKind::Tildes),
            _ => return None,
        };
        let len = remainder.bytes().take_while(|&b| b == c).count();
        (len >= Self::MIN_LEN).then_some(FenceSig { kind, len })
    }

    /// A closing fence uses the opening character, is at least as long, and
    /// carries nothing but trailing whitespace.
    pub fn closes(open: FenceSig, remainder: &str) -> bool {
        match Self::sig(remainder) {
            Some(sig) => {
                sig.kind == open.kind && sig.len >= open.len && is_blank(&remainder[sig.len..])
            }
            None => false,
        }
    }
}

/// The fence that is currently open, with the indentation of its opener.
struct OpenFence;

impl ContextKey for OpenFence {
    type Value = (FenceSig, usize);
}

/// Fenced code blocks. Content lines are kept raw; nothing inside is parsed.
#[derive(Debug, Default)]
pub struct FencedCodeParser;

impl FencedCodeParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BlockParser for FencedCodeParser {
    fn trigger(&self) -> Option<&[u8]> {
        Some(b"`~")
    }

    fn open(
        &self,
        _parent: NodeId,
        reader: &mut Reader<'_>,
        pc: &mut Context,
    ) -> Option<(NodeId, Children)> {
        let (line, seg) = reader.peek_line()?;
        let (indent, skip) = indent_width(&line);
        let rest = &line[skip..];
        let sig = CodeFence::sig(rest)?;

        let after = skip + sig.len;
        if sig.kind == FenceKind::Backticks && line[after..].contains('`') {
            return None;
        }
        let info = Segment::new(seg.start + after, seg.stop)
            .trim_left_space(reader.source())
            .trim_right_space(reader.source());
        let info = (!info.is_empty()).then_some(info);

        let node = pc.tree_mut().new_node(NodeKind::FencedCode {
            fence: sig.kind,
            info,
        });
        pc.set::<OpenFence>((sig, indent));
        reader.advance(seg.len());
        Some((node, Children::Leaf))
    }

    fn continue_block(&self, node: NodeId, reader: &mut Reader<'_>, pc: &mut Context) -> State {
        let Some((line, seg)) = reader.peek_line() else {
            return State::Close;
        };
        let Some(&(sig, fence_indent)) = pc.get::<OpenFence>() else {
            return State::Reconsider;
        };

        let (indent, skip) = indent_width(&line);
        if indent <= 3 && CodeFence::closes(sig, &line[skip..]) {
            reader.advance(seg.len());
            return State::Close;
        }

        // Content loses up to as many leading spaces as the opener had.
        let strip = line
            .bytes()
            .take(fence_indent)
            .take_while(|&b| b == b' ')
            .count();
        pc.tree_mut()
            .lines_mut(node)
            .append(Segment::new(seg.start + strip, seg.stop));
        reader.advance(seg.len());
        State::Continue(Children::Leaf)
    }

    fn close(&self, _node: NodeId, _reader: &Reader<'_>, pc: &mut Context) {
        pc.take::<OpenFence>();
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }

    fn can_accept_indented_line(&self) -> bool {
        false
    }
}
