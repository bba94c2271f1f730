//! # Rendering
//!
//! Walks an [`Ast`] and hands each node, on entering and on leaving, to a
//! priority-ordered chain of [`NodeRenderer`]s. The first renderer that
//! claims a node writes its output; the rest are not consulted.
//!
//! ## Modules
//!
//! - **`config`**: `Config` and the `ConfigOption`s that build it
//! - **`html`**: `HtmlRenderer`, the stock HTML serializer
//!
//! ## Key Invariants
//!
//! - Configuration freezes on the first render, exactly once, even when
//!   several threads render at the same time
//! - Options reach every `SetOptioner` before any node is rendered
//! - A failing render issues no flush to the sink

pub mod config;
pub mod html;

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufWriter, Write};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use log::{debug, trace, warn};

use crate::ast::{Ast, NodeId, WalkStatus, walk};
use crate::error::RenderError;
use crate::prioritized::sort_by_priority;
use crate::text::Source;

pub use config::{
    Config, ConfigOption, NodeRendererEntry, boxed, with_node_renderers, with_option,
};
pub use html::{HtmlConfig, HtmlRenderer};

/// The name of a renderer option.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionName(String);

impl OptionName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OptionName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for OptionName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An option value of any type. Renderers downcast to what they expect.
#[derive(Clone)]
pub struct OptionValue(Arc<dyn Any + Send + Sync>);

impl OptionValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.downcast_ref::<bool>().copied()
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.downcast_ref::<String>().map(String::as_str)
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(b) = self.as_bool() {
            write!(f, "OptionValue({b})")
        } else if let Some(s) = self.as_str() {
            write!(f, "OptionValue({s:?})")
        } else if let Some(n) = self.downcast_ref::<i64>() {
            write!(f, "OptionValue({n})")
        } else {
            f.write_str("OptionValue(..)")
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

/// A renderer's answer for one node visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Output was written; the walk continues as instructed.
    Claimed(WalkStatus),
    /// Not this renderer's node; ask the next one.
    NotApplicable,
}

/// Serializes the node kinds it knows about.
pub trait NodeRenderer: fmt::Debug + Send + Sync {
    fn render(
        &self,
        w: &mut dyn Write,
        source: &Source,
        ast: &Ast,
        node: NodeId,
        entering: bool,
    ) -> Result<Outcome, RenderError>;

    /// Renderers that accept named options return themselves here.
    fn as_set_optioner(&mut self) -> Option<&mut dyn SetOptioner> {
        None
    }
}

/// Receives renderer options when the renderer freezes.
pub trait SetOptioner {
    /// Called once per option. Unknown names should be ignored.
    fn set_option(&mut self, name: &OptionName, value: &OptionValue);
}

#[derive(Debug)]
struct Frozen {
    node_renderers: Vec<Box<dyn NodeRenderer>>,
}

/// Dispatches nodes to a frozen chain of [`NodeRenderer`]s.
#[derive(Debug)]
pub struct Renderer {
    pending: Mutex<Option<Config>>,
    frozen: OnceLock<Frozen>,
}

impl Renderer {
    #[must_use]
    pub fn new(options: impl IntoIterator<Item = ConfigOption>) -> Self {
        Self {
            pending: Mutex::new(Some(Config::new(options))),
            frozen: OnceLock::new(),
        }
    }

    /// Applies another option. Ignored, with a warning, once the renderer has
    /// rendered anything.
    pub fn add_option(&self, option: ConfigOption) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        match pending.as_mut() {
            Some(config) => option.apply(config),
            None => warn!("renderer is already frozen; ignoring {option:?}"),
        }
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen.get().is_some()
    }

    fn frozen(&self) -> &Frozen {
        self.frozen.get_or_init(|| {
            let config = self
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take()
                .unwrap_or_default();
            freeze(config)
        })
    }

    /// Renders `root` and its subtree into `sink` through a buffer.
    ///
    /// The buffer is flushed once when the walk succeeds. On error it is
    /// discarded and the sink is never flushed.
    pub fn render<W: Write>(
        &self,
        sink: W,
        source: &Source,
        ast: &Ast,
        root: NodeId,
    ) -> Result<(), RenderError> {
        let mut out = BufWriter::new(sink);
        match self.render_buffered(&mut out, source, ast, root) {
            Ok(()) => {
                out.flush()?;
                Ok(())
            }
            Err(err) => {
                let _ = out.into_parts();
                Err(err)
            }
        }
    }

    /// Renders into an existing buffer without flushing it.
    pub fn render_buffered<W: Write>(
        &self,
        out: &mut BufWriter<W>,
        source: &Source,
        ast: &Ast,
        root: NodeId,
    ) -> Result<(), RenderError> {
        let frozen = self.frozen();
        walk(ast, root, |node, entering| {
            for renderer in &frozen.node_renderers {
                match renderer.render(out, source, ast, node, entering)? {
                    Outcome::Claimed(status) => return Ok(status),
                    Outcome::NotApplicable => {}
                }
            }
            trace!(
                "no renderer for {} node ({})",
                ast.kind(node).name(),
                if entering { "entering" } else { "leaving" }
            );
            Ok(WalkStatus::Continue)
        })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new([with_node_renderers(vec![boxed(HtmlRenderer::default(), 1000)])])
    }
}

fn freeze(config: Config) -> Frozen {
    let Config {
        options,
        mut node_renderers,
    } = config;
    sort_by_priority(&mut node_renderers);
    let mut node_renderers: Vec<_> = node_renderers.into_iter().map(|r| r.value).collect();
    propagate_options(&options, &mut node_renderers);
    debug!(
        "renderer frozen with {} node renderers and {} options",
        node_renderers.len(),
        options.len()
    );
    Frozen { node_renderers }
}

fn propagate_options(
    options: &BTreeMap<OptionName, OptionValue>,
    renderers: &mut [Box<dyn NodeRenderer>],
) {
    for renderer in renderers {
        if let Some(target) = renderer.as_set_optioner() {
            for (name, value) in options {
                target.set_option(name, value);
            }
        }
    }
}
