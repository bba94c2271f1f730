//! # Block Parsing
//!
//! A line-at-a-time driver over pluggable [`BlockParser`]s. Each parser owns
//! the syntax knowledge of one block kind; the driver only knows the
//! open/continue/close protocol and the stack of open blocks.
//!
//! ## Modules
//!
//! - **`block`**: the `BlockParser` trait plus the `Children` and `State` signals
//! - **`context`**: `Context`, the per-document state shared by all parsers
//! - **`setext`**: setext headings, which claim an already-open paragraph
//! - **`heading`**: ATX headings and the options both heading kinds share
//! - **`attributes`**: the trailing `{#id .class key=value}` tokenizer
//! - **`ids`**: unique heading ID generation
//! - **`kinds`**: paragraph, fenced code and blockquote parsers
//! - **`inline`**: the text-only inline pass run after block parsing
//!
//! ## Key Invariants
//!
//! - Parsers are tried in ascending priority; ties keep registration order
//! - `close` runs exactly once per opened block, innermost first
//! - A paragraph is always the innermost open block
//! - Parsing never fails: every input yields a tree

pub mod attributes;
pub mod block;
pub mod context;
pub mod heading;
pub mod ids;
pub mod inline;
pub mod kinds;
pub mod setext;

use log::{debug, trace};

use crate::ast::{Ast, NodeId};
use crate::prioritized::{Prioritized, prioritized, sort_by_priority};
use crate::text::{Reader, Source, indent_width, is_blank};

pub use block::{BlockParser, Children, State};
pub use context::{Context, ContextKey, OpenedBlock};
pub use heading::{
    AtxHeadingParser, HeadingConfig, HeadingOption, with_attribute, with_auto_heading_id,
};
pub use ids::HeadingIds;
pub use kinds::{BlockQuoteParser, FencedCodeParser, ParagraphParser};
pub use setext::{SetextHeadingParser, matches_setext_bar};

/// A block parser registration.
pub type BlockParserEntry = Prioritized<Box<dyn BlockParser>>;

/// Configuration applied to a [`Parser`].
#[derive(Debug)]
pub enum ParserOption {
    /// Adds block parsers to the existing set.
    BlockParsers(Vec<BlockParserEntry>),
}

#[must_use]
pub fn with_block_parsers(parsers: Vec<BlockParserEntry>) -> ParserOption {
    ParserOption::BlockParsers(parsers)
}

/// The stock block parsers and their priorities.
#[must_use]
pub fn default_block_parsers(config: HeadingConfig) -> Vec<BlockParserEntry> {
    vec![
        boxed(SetextHeadingParser::new(config), 100),
        boxed(AtxHeadingParser::new(config), 600),
        boxed(FencedCodeParser::new(), 700),
        boxed(BlockQuoteParser::new(), 800),
        boxed(ParagraphParser::new(), 1000),
    ]
}

/// Boxes a parser into a registration.
pub fn boxed(parser: impl BlockParser + 'static, priority: i32) -> BlockParserEntry {
    prioritized(Box::new(parser) as Box<dyn BlockParser>, priority)
}

/// Turns a [`Source`] into an [`Ast`].
#[derive(Debug)]
pub struct Parser {
    block_parsers: Vec<BlockParserEntry>,
}

impl Parser {
    #[must_use]
    pub fn new(options: impl IntoIterator<Item = ParserOption>) -> Self {
        let mut parser = Self {
            block_parsers: Vec::new(),
        };
        for option in options {
            parser.add_option(option);
        }
        parser
    }

    /// A parser with the stock block parsers.
    #[must_use]
    pub fn with_defaults(config: HeadingConfig) -> Self {
        Self::new([with_block_parsers(default_block_parsers(config))])
    }

    pub fn add_option(&mut self, option: ParserOption) {
        match option {
            ParserOption::BlockParsers(parsers) => self.block_parsers.extend(parsers),
        }
        sort_by_priority(&mut self.block_parsers);
    }

    /// Registered parsers in the order they are tried.
    pub fn block_parsers(&self) -> impl Iterator<Item = &dyn BlockParser> {
        self.block_parsers.iter().map(|entry| entry.value.as_ref())
    }

    /// Parses a whole document.
    #[must_use]
    pub fn parse(&self, source: &Source) -> Ast {
        let mut pc = Context::new();
        self.parse_blocks(source, &mut pc);
        let mut ast = pc.into_tree();
        inline::parse_text(&mut ast, source);
        ast
    }

    /// Runs block parsing only, leaving `pc` holding the tree.
    pub fn parse_blocks(&self, source: &Source, pc: &mut Context) {
        let mut reader = Reader::new(source);
        let mut blank_before = false;
        while let Some((line, _)) = reader.peek_line() {
            trace!("line {}: {:?}", reader.line_number(), line);
            blank_before = self.process_line(&mut reader, pc, blank_before);
            reader.advance_line();
        }
        self.close_blocks(0, &reader, pc);
    }

    /// Returns whether the line was blank once container prefixes were taken.
    fn process_line(&self, reader: &mut Reader<'_>, pc: &mut Context, blank_before: bool) -> bool {
        let mut parent = pc.tree().root();
        let mut i = 0;
        while let Some(&block) = pc.opened_blocks().get(i) {
            if pc.tree().kind(block.node).is_paragraph()
                && self.open_blocks(parent, reader, pc, blank_before)
            {
                return false;
            }

            let blank = remainder_is_blank(reader);
            let parser = &self.block_parsers[block.parser].value;
            match parser.continue_block(block.node, reader, pc) {
                State::Continue(Children::Allowed) => {
                    parent = block.node;
                    i += 1;
                }
                State::Continue(Children::Leaf) => return blank,
                State::Close => {
                    self.close_blocks(i, reader, pc);
                    return blank;
                }
                State::Reconsider => {
                    self.close_blocks(i, reader, pc);
                    break;
                }
            }
        }

        let blank = remainder_is_blank(reader);
        self.open_blocks(parent, reader, pc, blank_before);
        blank
    }

    /// Opens new blocks under `parent` for the rest of the current line.
    ///
    /// When a paragraph is the innermost open block only parsers that may
    /// interrupt it are tried, and the paragraph is closed once one of them
    /// opens. Returns whether anything opened.
    fn open_blocks(
        &self,
        mut parent: NodeId,
        reader: &mut Reader<'_>,
        pc: &mut Context,
        blank_before: bool,
    ) -> bool {
        let mut opened = false;
        'retry: loop {
            let Some((line, _)) = reader.peek_line() else {
                return opened;
            };
            if is_blank(&line) {
                return opened;
            }
            let (indent, skip) = indent_width(&line);
            let first = line.as_bytes().get(skip).copied();
            let paragraph = pc
                .last_opened_block()
                .filter(|b| pc.tree().kind(b.node).is_paragraph());

            for (index, entry) in self.block_parsers.iter().enumerate() {
                let bp = &entry.value;
                if indent > 3 && !bp.can_accept_indented_line() {
                    continue;
                }
                if paragraph.is_some() && !bp.can_interrupt_paragraph() {
                    continue;
                }
                if let (Some(trigger), Some(first)) = (bp.trigger(), first)
                    && !trigger.contains(&first)
                {
                    continue;
                }
                let Some((node, children)) = bp.open(parent, reader, pc) else {
                    continue;
                };

                if paragraph.is_some() {
                    let depth = pc.opened_blocks().len() - 1;
                    self.close_blocks(depth, reader, pc);
                }
                let tree = pc.tree_mut();
                tree.set_blank_previous_lines(node, blank_before);
                tree.append_child(parent, node);
                pc.push_opened(OpenedBlock {
                    node,
                    parser: index,
                });
                debug!(
                    "opened {} at line {} ({bp:?})",
                    pc.tree().kind(node).name(),
                    reader.line_number()
                );
                opened = true;

                if children == Children::Allowed {
                    parent = node;
                    continue 'retry;
                }
                return true;
            }
            return opened;
        }
    }

    /// Closes every open block from depth `from` inward, innermost first.
    fn close_blocks(&self, from: usize, reader: &Reader<'_>, pc: &mut Context) {
        while pc.opened_blocks().len() > from {
            let Some(block) = pc.pop_opened() else {
                break;
            };
            let parser = &self.block_parsers[block.parser].value;
            debug!(
                "closing {} at line {}",
                pc.tree().kind(block.node).name(),
                reader.line_number()
            );
            parser.close(block.node, reader, pc);
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::with_defaults(HeadingConfig::default())
    }
}

fn remainder_is_blank(reader: &Reader<'_>) -> bool {
    reader.peek_line().is_none_or(|(line, _)| is_blank(&line))
}
