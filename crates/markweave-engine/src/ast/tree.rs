use crate::text::Lines;

use super::node::{Node, NodeId, NodeKind};

/// Arena-backed document tree.
///
/// Nodes are addressed by [`NodeId`] and never deallocated while the tree
/// lives; removing a node only unlinks it. Every structural edit updates the
/// parent, child and sibling links of all affected nodes before returning.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<Node>,
}

const ROOT: NodeId = NodeId(0);

impl Ast {
    /// Creates a tree holding only a `Document` root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document)],
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Allocates a detached node.
    pub fn new_node(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    /// # Panics
    /// Panics if `id` belongs to another tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev_sibling
    }

    /// Iterates the direct children of `id` in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            ast: self,
            next: self.first_child(id),
        }
    }

    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    #[must_use]
    pub fn lines(&self, id: NodeId) -> &Lines {
        &self.node(id).lines
    }

    pub fn lines_mut(&mut self, id: NodeId) -> &mut Lines {
        &mut self.node_mut(id).lines
    }

    pub fn set_lines(&mut self, id: NodeId, lines: Lines) {
        self.node_mut(id).lines = lines;
    }

    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attribute(name)
    }

    /// Sets an attribute, replacing any previous value under the same name.
    pub fn set_attribute(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        let (name, value) = (name.into(), value.into());
        let attributes = &mut self.node_mut(id).attributes;
        match attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => attributes.push((name, value)),
        }
    }

    #[must_use]
    pub fn has_blank_previous_lines(&self, id: NodeId) -> bool {
        self.node(id).blank_previous_lines
    }

    pub fn set_blank_previous_lines(&mut self, id: NodeId, blank: bool) {
        self.node_mut(id).blank_previous_lines = blank;
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    ///
    /// # Panics
    /// Panics if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.assert_acyclic(parent, child);
        self.detach(child);
        let last = self.node(parent).last_child;
        {
            let c = self.node_mut(child);
            c.parent = Some(parent);
            c.prev_sibling = last;
        }
        match last {
            Some(last) => self.node_mut(last).next_sibling = Some(child),
            None => self.node_mut(parent).first_child = Some(child),
        }
        self.node_mut(parent).last_child = Some(child);
    }

    /// Inserts `child` directly after `reference`, a child of `parent`.
    ///
    /// # Panics
    /// Panics if `reference` is not a child of `parent`, or if the insertion
    /// would create a cycle.
    pub fn insert_after(&mut self, parent: NodeId, reference: NodeId, child: NodeId) {
        assert_eq!(
            self.parent(reference),
            Some(parent),
            "insert_after: reference node is not a child of the given parent"
        );
        self.assert_acyclic(parent, child);
        self.detach(child);
        let next = self.node(reference).next_sibling;
        {
            let c = self.node_mut(child);
            c.parent = Some(parent);
            c.prev_sibling = Some(reference);
            c.next_sibling = next;
        }
        self.node_mut(reference).next_sibling = Some(child);
        match next {
            Some(next) => self.node_mut(next).prev_sibling = Some(child),
            None => self.node_mut(parent).last_child = Some(child),
        }
    }

    /// Inserts `child` directly before `reference`, a child of `parent`.
    ///
    /// # Panics
    /// Panics if `reference` is not a child of `parent`, or if the insertion
    /// would create a cycle.
    pub fn insert_before(&mut self, parent: NodeId, reference: NodeId, child: NodeId) {
        assert_eq!(
            self.parent(reference),
            Some(parent),
            "insert_before: reference node is not a child of the given parent"
        );
        self.assert_acyclic(parent, child);
        self.detach(child);
        let prev = self.node(reference).prev_sibling;
        {
            let c = self.node_mut(child);
            c.parent = Some(parent);
            c.prev_sibling = prev;
            c.next_sibling = Some(reference);
        }
        self.node_mut(reference).prev_sibling = Some(child);
        match prev {
            Some(prev) => self.node_mut(prev).next_sibling = Some(child),
            None => self.node_mut(parent).first_child = Some(child),
        }
    }

    /// Unlinks `child` from `parent`. Does nothing if `child` is not a child
    /// of `parent`. The removed node keeps its own children.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) != Some(parent) {
            return;
        }
        self.detach(child);
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };
        let (prev, next) = (self.node(id).prev_sibling, self.node(id).next_sibling);
        match prev {
            Some(prev) => self.node_mut(prev).next_sibling = next,
            None => self.node_mut(parent).first_child = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev_sibling = prev,
            None => self.node_mut(parent).last_child = prev,
        }
        let n = self.node_mut(id);
        n.parent = None;
        n.prev_sibling = None;
        n.next_sibling = None;
    }

    fn assert_acyclic(&self, parent: NodeId, child: NodeId) {
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            assert_ne!(id, child, "tree edit would make a node its own ancestor");
            cursor = self.parent(id);
        }
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the direct children of a node.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    ast: &'a Ast,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.ast.next_sibling(current);
        Some(current)
    }
}
