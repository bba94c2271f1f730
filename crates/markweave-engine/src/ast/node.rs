use crate::text::{Lines, Segment};

/// Stable handle to a node in an [`Ast`](super::Ast) arena.
///
/// Handles stay valid after the node is detached; a detached node simply has
/// no parent and no siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Which character a code fence was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// The kind of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The root of every parsed tree.
    Document,
    /// The default leaf block when no other block opener matches.
    Paragraph,
    /// An ATX (`#`) or setext (underlined) heading.
    Heading {
        /// 1 to 6.
        level: u8,
    },
    /// A `>` container.
    BlockQuote,
    /// A fenced code block; its lines are the raw content lines.
    FencedCode {
        fence: FenceKind,
        /// Info string after the opening fence, if any.
        info: Option<Segment>,
    },
    /// An inline run of plain text.
    Text {
        segment: Segment,
        /// A soft line break follows this text.
        soft_break: bool,
    },
}

impl NodeKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::Heading { .. } => "Heading",
            NodeKind::BlockQuote => "BlockQuote",
            NodeKind::FencedCode { .. } => "FencedCode",
            NodeKind::Text { .. } => "Text",
        }
    }

    #[must_use]
    pub fn is_block(&self) -> bool {
        !matches!(self, NodeKind::Text { .. })
    }

    #[must_use]
    pub fn is_paragraph(&self) -> bool {
        matches!(self, NodeKind::Paragraph)
    }
}

/// One arena slot: node payload plus its tree links.
///
/// Links are private; every structural change goes through [`Ast`](super::Ast)
/// so parent and sibling pointers never disagree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) lines: Lines,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) blank_previous_lines: bool,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            lines: Lines::new(),
            attributes: Vec::new(),
            blank_previous_lines: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    #[must_use]
    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    #[must_use]
    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    #[must_use]
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    #[must_use]
    pub fn lines(&self) -> &Lines {
        &self.lines
    }

    /// Attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a blank line preceded this block in the source.
    #[must_use]
    pub fn has_blank_previous_lines(&self) -> bool {
        self.blank_previous_lines
    }
}
