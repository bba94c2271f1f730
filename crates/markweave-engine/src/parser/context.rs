use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::ast::{Ast, NodeId};

use super::ids::HeadingIds;

/// A typed slot in a [`Context`].
///
/// Each parser that needs to stash state between calls declares its own
/// zero-sized key type. Keys from independently written parsers can never
/// collide, and the stored value is type checked at compile time.
///
/// ```ignore
/// struct PendingParagraph;
/// impl ContextKey for PendingParagraph {
///     type Value = NodeId;
/// }
/// ```
pub trait ContextKey: 'static {
    type Value: Any;
}

/// A block that is open in the current parse, with the index of the parser
/// that opened it (into the driver's sorted parser list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenedBlock {
    pub node: NodeId,
    pub parser: usize,
}

/// Mutable state shared by every block parser during one document parse.
///
/// Owns the tree under construction. Discarded (via [`Context::into_tree`])
/// before rendering.
#[derive(Debug, Default)]
pub struct Context {
    tree: Ast,
    state: HashMap<TypeId, Box<dyn Any>>,
    opened: Vec<OpenedBlock>,
    ids: HeadingIds,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tree(&self) -> &Ast {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Ast {
        &mut self.tree
    }

    #[must_use]
    pub fn into_tree(self) -> Ast {
        self.tree
    }

    #[must_use]
    pub fn get<K: ContextKey>(&self) -> Option<&K::Value> {
        self.state
            .get(&TypeId::of::<K>())
            .and_then(|v| v.downcast_ref::<K::Value>())
    }

    /// Stores a value under `K`, replacing any previous one.
    pub fn set<K: ContextKey>(&mut self, value: K::Value) {
        self.state.insert(TypeId::of::<K>(), Box::new(value));
    }

    /// Removes and returns the value stored under `K`.
    pub fn take<K: ContextKey>(&mut self) -> Option<K::Value> {
        self.state
            .remove(&TypeId::of::<K>())
            .and_then(|v| v.downcast::<K::Value>().ok())
            .map(|v| *v)
    }

    /// The most recently opened block that has not been closed yet.
    #[must_use]
    pub fn last_opened_block(&self) -> Option<OpenedBlock> {
        self.opened.last().copied()
    }

    /// Open blocks from the outermost to the innermost.
    #[must_use]
    pub fn opened_blocks(&self) -> &[OpenedBlock] {
        &self.opened
    }

    pub fn push_opened(&mut self, block: OpenedBlock) {
        self.opened.push(block);
    }

    pub fn pop_opened(&mut self) -> Option<OpenedBlock> {
        self.opened.pop()
    }

    /// IDs handed out to headings in this document.
    pub fn ids_mut(&mut self) -> &mut HeadingIds {
        &mut self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter;
    impl ContextKey for Counter {
        type Value = u32;
    }

    struct Label;
    impl ContextKey for Label {
        type Value = String;
    }

    #[test]
    fn keys_do_not_collide() {
        let mut pc = Context::new();
        pc.set::<Counter>(7);
        pc.set::<Label>("stash".to_string());
        assert_eq!(pc.get::<Counter>(), Some(&7));
        assert_eq!(pc.get::<Label>().map(String::as_str), Some("stash"));
    }

    #[test]
    fn take_clears_the_slot() {
        let mut pc = Context::new();
        pc.set::<Counter>(1);
        assert_eq!(pc.take::<Counter>(), Some(1));
        assert_eq!(pc.take::<Counter>(), None);
        assert_eq!(pc.get::<Counter>(), None);
    }

    #[test]
    fn tracks_last_opened_block() {
        let mut pc = Context::new();
        assert_eq!(pc.last_opened_block(), None);
        let root = pc.tree().root();
        pc.push_opened(OpenedBlock { node: root, parser: 3 });
        assert_eq!(pc.last_opened_block().map(|b| b.parser), Some(3));
        pc.pop_opened();
        assert!(pc.opened_blocks().is_empty());
    }
}
