//! # markweave engine
//!
//! Lightweight markup in, HTML (or anything else) out, through two
//! extensible stages:
//!
//! 1. **Parsing** (`parser`): a driver feeds each line of a [`Source`] to
//!    priority-ordered [`BlockParser`]s that build an [`Ast`]
//! 2. **Rendering** (`renderer`): a [`Renderer`] walks the tree and offers
//!    every node to a priority-ordered chain of [`NodeRenderer`]s
//!
//! Both stages take third-party parsers and renderers without changes here.
//!
//! ```
//! use markweave_engine::Markdown;
//!
//! let html = Markdown::default().to_html("Title\n===\n").unwrap();
//! assert_eq!(html, "<h1>Title</h1>\n");
//! ```

pub mod ast;
pub mod error;
pub mod markdown;
pub mod parser;
pub mod prioritized;
pub mod renderer;
pub mod text;

pub use ast::{Ast, NodeId, NodeKind, WalkStatus};
pub use error::RenderError;
pub use markdown::Markdown;
pub use parser::{BlockParser, Context, ContextKey, Parser};
pub use prioritized::{Prioritized, prioritized};
pub use renderer::{NodeRenderer, Outcome, Renderer, SetOptioner};
pub use text::{Segment, Source};
