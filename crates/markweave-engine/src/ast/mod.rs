//! # Document Tree
//!
//! An arena of nodes addressed by stable [`NodeId`]s. Block nodes own ordered
//! line segments into the source; inline `Text` nodes own a single segment.
//!
//! ## Modules
//!
//! - **`node`**: `NodeKind`, `Node` and the `NodeId` handle
//! - **`tree`**: `Ast`, the arena with its atomic structural edits
//! - **`walk`**: depth-first entering/leaving traversal with `WalkStatus`
//! - **`dump`**: human-readable outline used by tests and debugging
//! - **`invariants`**: runtime checks for span bounds and link consistency
//!
//! ## Key Invariants
//!
//! - A node has at most one parent; parents exclusively own their children
//! - A detached node has no parent and no siblings
//! - Sibling order and back-links are never observable half-updated

pub mod dump;
pub mod invariants;
pub mod node;
pub mod tree;
pub mod walk;

pub use dump::dump;
pub use node::{FenceKind, Node, NodeId, NodeKind};
pub use tree::{Ast, Children};
pub use walk::{WalkStatus, walk};
