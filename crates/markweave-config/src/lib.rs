//! # markweave configuration
//!
//! Reads and writes `~/.config/markweave/config.toml` and turns it into the
//! engine's parser and renderer options.
//!
//! ```toml
//! [parser]
//! attribute = true
//! auto_heading_id = true
//!
//! [renderer]
//! hard_wraps = false
//! xhtml = false
//!
//! [renderer.options]
//! custom = "value"
//! ```
//!
//! Every key is optional. Entries under `[renderer.options]` are forwarded to
//! the renderers verbatim as named options.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;
use markweave_engine::parser::{HeadingConfig, HeadingOption, Parser};
use markweave_engine::renderer::html::{HARD_WRAPS, XHTML};
use markweave_engine::renderer::{
    ConfigOption, HtmlRenderer, OptionValue, boxed, with_node_renderers, with_option,
};
use markweave_engine::{Markdown, Renderer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserSettings,
    pub renderer: RendererSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Read `{#id .class key=value}` blocks at the end of headings.
    pub attribute: bool,
    pub auto_heading_id: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    pub hard_wraps: bool,
    pub xhtml: bool,
    /// Extra named options for third-party renderers.
    pub options: BTreeMap<String, toml::Value>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            debug!("no config at {}", config_path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        debug!("loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markweave");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    #[must_use]
    pub fn heading_config(&self) -> HeadingConfig {
        let ParserSettings {
            attribute,
            auto_heading_id,
        } = self.parser;
        HeadingConfig::new(
            [
                attribute.then_some(HeadingOption::Attribute),
                auto_heading_id.then_some(HeadingOption::AutoHeadingId),
            ]
            .into_iter()
            .flatten(),
        )
    }

    /// The renderer options this file describes, HTML flags first.
    ///
    /// An entry in `[renderer.options]` with the same name as an HTML flag
    /// comes later and wins.
    #[must_use]
    pub fn renderer_options(&self) -> Vec<ConfigOption> {
        let settings = &self.renderer;
        let mut options = vec![
            with_option(HARD_WRAPS, settings.hard_wraps),
            with_option(XHTML, settings.xhtml),
        ];
        options.extend(
            settings
                .options
                .iter()
                .map(|(name, value)| with_option(name.as_str(), option_value(value))),
        );
        options
    }

    /// A ready-to-use HTML converter for this configuration.
    #[must_use]
    pub fn markdown(&self) -> Markdown {
        let mut options = vec![with_node_renderers(vec![boxed(HtmlRenderer::default(), 1000)])];
        options.extend(self.renderer_options());
        Markdown::new(
            Parser::with_defaults(self.heading_config()),
            Renderer::new(options),
        )
    }
}

/// Scalars become the plain Rust type renderers downcast to; anything else
/// is passed through as a `toml::Value`.
fn option_value(value: &toml::Value) -> OptionValue {
    match value {
        toml::Value::Boolean(b) => OptionValue::from(*b),
        toml::Value::String(s) => OptionValue::from(s.clone()),
        toml::Value::Integer(i) => OptionValue::from(*i),
        toml::Value::Float(f) => OptionValue::new(*f),
        other => OptionValue::new(other.clone()),
    }
}
