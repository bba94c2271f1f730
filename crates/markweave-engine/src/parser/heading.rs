use log::trace;

use crate::ast::{NodeId, NodeKind};
use crate::text::{Reader, Segment, Source, indent_width, is_space};

use super::attributes::find_attributes_reverse;
use super::block::{BlockParser, Children, State};
use super::context::Context;

/// Options shared by the setext and ATX heading parsers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadingConfig {
    /// Parse a trailing `{#id .class key=value}` block into attributes.
    pub attribute: bool,
    /// Give headings without an explicit `id` a generated one.
    pub auto_heading_id: bool,
}

impl HeadingConfig {
    #[must_use]
    pub fn new(options: impl IntoIterator<Item = HeadingOption>) -> Self {
        let mut config = Self::default();
        for option in options {
            option.apply(&mut config);
        }
        config
    }
}

/// A single change to a [`HeadingConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingOption {
    Attribute,
    AutoHeadingId,
}

impl HeadingOption {
    pub fn apply(self, config: &mut HeadingConfig) {
        match self {
            HeadingOption::Attribute => config.attribute = true,
            HeadingOption::AutoHeadingId => config.auto_heading_id = true,
        }
    }
}

#[must_use]
pub fn with_attribute() -> HeadingOption {
    HeadingOption::Attribute
}

#[must_use]
pub fn with_auto_heading_id() -> HeadingOption {
    HeadingOption::AutoHeadingId
}

/// Applies the attribute and ID options to a heading whose lines are final.
///
/// With `attribute` on, a trailing `{...}` block on the last line becomes
/// node attributes and the line is cut before the `{`. An explicit `id` is
/// reserved in the document's ID registry; otherwise, with
/// `auto_heading_id` on, one is generated from the heading text.
pub fn finish_heading(config: HeadingConfig, node: NodeId, source: &Source, pc: &mut Context) {
    let tree = pc.tree_mut();
    if config.attribute
        && let Some(last) = tree.lines(node).last()
        && let Some(block) = find_attributes_reverse(&last.value(source))
    {
        for (name, value) in block.attributes {
            tree.set_attribute(node, name, value);
        }
        let cut = last
            .with_stop(last.start + block.open)
            .trim_right_space(source);
        let index = tree.lines(node).len() - 1;
        tree.lines_mut(node).set(index, cut);
    }

    if let Some(id) = tree.attribute(node, "id").map(str::to_owned) {
        pc.ids_mut().put(&id);
        return;
    }
    if config.auto_heading_id {
        let text = heading_text(pc, node, source);
        let id = pc.ids_mut().generate(&text);
        trace!("generated heading id {id:?}");
        pc.tree_mut().set_attribute(node, "id", id);
    }
}

/// Trimmed heading lines joined by single spaces.
fn heading_text(pc: &Context, node: NodeId, source: &Source) -> String {
    pc.tree()
        .lines(node)
        .iter()
        .map(|seg| {
            seg.trim_left_space(source)
                .trim_right_space(source)
                .value(source)
                .into_owned()
        })
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Locates the heading content of an ATX line, already stripped of leading
/// indentation: the `#` run, then the text with any closing sequence removed.
///
/// Returns the level and the content's byte range within `line`.
pub fn match_atx(line: &str) -> Option<(u8, usize, usize)> {
    let bytes = line.as_bytes();
    let level = bytes.iter().take_while(|&&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    if bytes.get(level).is_some_and(|&b| !is_space(b as char)) {
        return None;
    }

    let start = level + (line.len() - level - line[level..].trim_start_matches(is_space).len());
    let mut stop = start + line[start..].trim_end_matches(is_space).len();
    let closing = line[start..stop].len() - line[start..stop].trim_end_matches('#').len();
    if closing > 0 {
        let before = stop - closing;
        if before == start || bytes.get(before - 1).is_some_and(|&b| is_space(b as char)) {
            stop = start + line[start..before].trim_end_matches(is_space).len();
        }
    }
    Some((level as u8, start, stop))
}

/// `#` through `######` headings on a single line.
#[derive(Debug, Default)]
pub struct AtxHeadingParser {
    config: HeadingConfig,
}

impl AtxHeadingParser {
    #[must_use]
    pub fn new(config: HeadingConfig) -> Self {
        Self { config }
    }
}

impl BlockParser for AtxHeadingParser {
    fn trigger(&self) -> Option<&[u8]> {
        Some(b"#")
    }

    fn open(
        &self,
        _parent: NodeId,
        reader: &mut Reader<'_>,
        pc: &mut Context,
    ) -> Option<(NodeId, Children)> {
        let (line, seg) = reader.peek_line()?;
        let (_, skip) = indent_width(&line);
        let (level, start, stop) = match_atx(&line[skip..])?;

        let tree = pc.tree_mut();
        let node = tree.new_node(NodeKind::Heading { level });
        if stop > start {
            let base = seg.start + skip;
            tree.lines_mut(node)
                .append(Segment::new(base + start, base + stop));
        }
        reader.advance(seg.len());
        Some((node, Children::Leaf))
    }

    fn continue_block(&self, _node: NodeId, _reader: &mut Reader<'_>, _pc: &mut Context) -> State {
        State::Reconsider
    }

    fn close(&self, node: NodeId, reader: &Reader<'_>, pc: &mut Context) {
        finish_heading(self.config, node, reader.source(), pc);
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }

    fn can_accept_indented_line(&self) -> bool {
        false
    }
}
