use std::collections::BTreeMap;

use crate::prioritized::{Prioritized, prioritized};

use super::{NodeRenderer, OptionName, OptionValue};

/// A node renderer registration.
pub type NodeRendererEntry = Prioritized<Box<dyn NodeRenderer>>;

/// Renderer state accumulated from [`ConfigOption`]s.
///
/// Renderers are kept in registration order here; they are sorted once, when
/// the owning [`Renderer`](super::Renderer) freezes.
#[derive(Debug, Default)]
pub struct Config {
    pub options: BTreeMap<OptionName, OptionValue>,
    pub node_renderers: Vec<NodeRendererEntry>,
}

impl Config {
    #[must_use]
    pub fn new(options: impl IntoIterator<Item = ConfigOption>) -> Self {
        let mut config = Self::default();
        for option in options {
            option.apply(&mut config);
        }
        config
    }
}

/// One change to a renderer [`Config`].
#[derive(Debug)]
pub enum ConfigOption {
    /// Adds node renderers to the collection.
    NodeRenderers(Vec<NodeRendererEntry>),
    /// Sets a named option. Later values replace earlier ones.
    Option(OptionName, OptionValue),
}

impl ConfigOption {
    pub fn apply(self, config: &mut Config) {
        match self {
            ConfigOption::NodeRenderers(renderers) => config.node_renderers.extend(renderers),
            ConfigOption::Option(name, value) => {
                config.options.insert(name, value);
            }
        }
    }
}

#[must_use]
pub fn with_node_renderers(renderers: Vec<NodeRendererEntry>) -> ConfigOption {
    ConfigOption::NodeRenderers(renderers)
}

#[must_use]
pub fn with_option(name: impl Into<OptionName>, value: impl Into<OptionValue>) -> ConfigOption {
    ConfigOption::Option(name.into(), value.into())
}

/// Boxes a renderer into a registration.
pub fn boxed(renderer: impl NodeRenderer + 'static, priority: i32) -> NodeRendererEntry {
    prioritized(Box::new(renderer) as Box<dyn NodeRenderer>, priority)
}
