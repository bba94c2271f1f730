use markweave_engine::ast::{dump, invariants};
use markweave_engine::parser::context::OpenedBlock;
use markweave_engine::parser::{
    BlockParser, Children, Context, HeadingConfig, Parser, SetextHeadingParser, with_attribute,
    with_auto_heading_id,
};
use markweave_engine::text::{Reader, Segment};
use markweave_engine::{Ast, NodeId, NodeKind, Source};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn parse_with(config: HeadingConfig, text: &str) -> (Source, Ast) {
    let source = Source::new(text);
    let ast = Parser::with_defaults(config).parse(&source);
    invariants::check(&ast, &source, ast.root());
    (source, ast)
}

fn outline(text: &str) -> String {
    let (source, ast) = parse_with(HeadingConfig::default(), text);
    dump(&ast, &source, ast.root())
}

fn blocks(ast: &Ast) -> Vec<NodeId> {
    ast.children(ast.root()).collect()
}

#[rstest]
#[case::equals("Title\n===\n", 1)]
#[case::dashes("Title\n---  \n", 2)]
#[case::single_char("Title\n=\n", 1)]
#[case::indented_bar("Title\n   ----\n", 2)]
#[case::no_trailing_newline("Title\n===", 1)]
fn bar_sets_level(#[case] text: &str, #[case] level: u8) {
    let (source, ast) = parse_with(HeadingConfig::default(), text);
    let blocks = blocks(&ast);
    assert_eq!(blocks.len(), 1);
    assert_eq!(ast.kind(blocks[0]), &NodeKind::Heading { level });
    assert_eq!(ast.lines(blocks[0]).value(&source), "Title");
}

#[test]
fn paragraph_becomes_heading() {
    insta::assert_snapshot!(outline("Title\n===\n"), @r#"
    Document
      Heading(1)
        Text "Title"
    "#);
}

#[test]
fn multi_line_paragraph_is_absorbed() {
    insta::assert_snapshot!(outline("Multi\nline\n---\n"), @r#"
    Document
      Heading(2)
        Text "Multi" +soft
        Text "line"
    "#);
}

#[test]
fn bar_after_blank_line_is_a_paragraph() {
    let (source, ast) = parse_with(HeadingConfig::default(), "\n---\n");
    let blocks = blocks(&ast);
    assert_eq!(blocks.len(), 1);
    assert!(ast.kind(blocks[0]).is_paragraph());
    assert_eq!(ast.lines(blocks[0]).value(&source), "---");
}

#[test]
fn blank_line_separates_paragraph_from_bar() {
    insta::assert_snapshot!(outline("Title\n\n===\n"), @r#"
    Document
      Paragraph
        Text "Title"
      Paragraph
        Text "==="
    "#);
}

#[test]
fn deeply_indented_bar_stays_paragraph_text() {
    insta::assert_snapshot!(outline("Text\n    ===\n"), @r#"
    Document
      Paragraph
        Text "Text" +soft
        Text "==="
    "#);
}

#[test]
fn bar_with_trailing_text_is_not_a_bar() {
    insta::assert_snapshot!(outline("Title\n=== x\n"), @r#"
    Document
      Paragraph
        Text "Title" +soft
        Text "=== x"
    "#);
}

#[test]
fn bar_under_atx_heading_is_a_paragraph() {
    insta::assert_snapshot!(outline("# Head\n===\n"), @r#"
    Document
      Heading(1)
        Text "Head"
      Paragraph
        Text "==="
    "#);
}

#[test]
fn next_line_starts_a_new_block() {
    insta::assert_snapshot!(outline("Title\n===\nbody\n"), @r#"
    Document
      Heading(1)
        Text "Title"
      Paragraph
        Text "body"
    "#);
}

#[test]
fn heading_inside_blockquote() {
    insta::assert_snapshot!(outline("> Quote\n> ---\n"), @r#"
    Document
      BlockQuote
        Heading(2)
          Text "Quote"
    "#);
}

#[test]
fn blank_previous_lines_moves_to_heading() {
    let (_, ast) = parse_with(HeadingConfig::default(), "intro\n\nTitle\n===\n");
    let blocks = blocks(&ast);
    assert_eq!(blocks.len(), 2);
    assert!(matches!(ast.kind(blocks[1]), NodeKind::Heading { level: 1 }));
    assert!(ast.has_blank_previous_lines(blocks[1]));
}

#[test]
fn attribute_block_sets_id_and_is_cut() {
    let config = HeadingConfig::new([with_attribute()]);
    let (source, ast) = parse_with(config, "Title {#custom-id}\n===\n");
    insta::assert_snapshot!(dump(&ast, &source, ast.root()), @r#"
    Document
      Heading(1) {id="custom-id"}
        Text "Title"
    "#);
}

#[test]
fn attributes_only_read_from_last_line() {
    let config = HeadingConfig::new([with_attribute()]);
    let (source, ast) = parse_with(config, "One {#a}\nTwo {.b}\n---\n");
    let heading = blocks(&ast)[0];
    assert_eq!(ast.node(heading).attributes(), &[("class".to_string(), "b".to_string())]);
    assert_eq!(ast.lines(heading).value(&source), "One {#a}\nTwo");
}

#[test]
fn attribute_text_stays_when_disabled() {
    let (source, ast) = parse_with(HeadingConfig::default(), "Title {#x}\n===\n");
    let heading = blocks(&ast)[0];
    assert_eq!(ast.attribute(heading, "id"), None);
    assert_eq!(ast.lines(heading).value(&source), "Title {#x}");
}

#[test]
fn auto_heading_ids_are_unique() {
    let config = HeadingConfig::new([with_auto_heading_id()]);
    let (_, ast) = parse_with(config, "Title\n===\n\nTitle\n---\n");
    let ids: Vec<_> = blocks(&ast)
        .into_iter()
        .map(|h| ast.attribute(h, "id").unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["title", "title-1"]);
}

#[test]
fn explicit_id_wins_over_generated_one() {
    let config = HeadingConfig::new([with_attribute(), with_auto_heading_id()]);
    let (_, ast) = parse_with(config, "Intro {#intro}\n===\n\nIntro\n===\n");
    let ids: Vec<_> = blocks(&ast)
        .into_iter()
        .map(|h| ast.attribute(h, "id").unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["intro", "intro-1"]);
}

/// Drives the setext parser by hand around an already-open paragraph that
/// holds no lines, the way a driver would after that paragraph closed empty.
struct EmptyParagraphFixture {
    source: Source,
    pc: Context,
    heading: NodeId,
}

impl EmptyParagraphFixture {
    /// `text`'s second line must be a setext bar.
    fn open(text: &str, parser: &SetextHeadingParser) -> Self {
        let source = Source::new(text);
        let mut pc = Context::new();
        let root = pc.tree().root();
        let paragraph = pc.tree_mut().new_node(NodeKind::Paragraph);
        pc.tree_mut().append_child(root, paragraph);
        pc.push_opened(OpenedBlock {
            node: paragraph,
            parser: 0,
        });

        let heading = {
            let mut reader = Reader::new(&source);
            reader.advance_line();
            let (heading, children) = parser.open(root, &mut reader, &mut pc).unwrap();
            assert_eq!(children, Children::Leaf);
            heading
        };

        // The paragraph closes with no lines and drops out of the tree.
        pc.pop_opened();
        pc.tree_mut().remove_child(root, paragraph);
        pc.tree_mut().append_child(root, heading);
        Self {
            source,
            pc,
            heading,
        }
    }

    fn close(&mut self, parser: &SetextHeadingParser) {
        let reader = Reader::new(&self.source);
        parser.close(self.heading, &reader, &mut self.pc);
    }
}

#[test]
fn empty_paragraph_turns_bar_into_new_paragraph() {
    let parser = SetextHeadingParser::default();
    let mut fx = EmptyParagraphFixture::open("\n   ---\n", &parser);
    fx.close(&parser);

    let ast = fx.pc.tree();
    let root = ast.root();
    let blocks: Vec<_> = ast.children(root).collect();
    assert_eq!(blocks.len(), 1);
    assert!(ast.kind(blocks[0]).is_paragraph());
    assert_eq!(ast.lines(blocks[0]).value(&fx.source), "---\n");
    assert_eq!(ast.parent(fx.heading), None);
    invariants::check(ast, &fx.source, root);
}

#[test]
fn empty_paragraph_prepends_bar_to_following_paragraph() {
    let parser = SetextHeadingParser::default();
    let mut fx = EmptyParagraphFixture::open("\n---\nnext\n", &parser);
    let root = fx.pc.tree().root();
    let next = fx.pc.tree_mut().new_node(NodeKind::Paragraph);
    fx.pc.tree_mut().lines_mut(next).append(Segment::new(5, 10));
    fx.pc.tree_mut().append_child(root, next);

    fx.close(&parser);

    let ast = fx.pc.tree();
    assert_eq!(ast.children(root).collect::<Vec<_>>(), vec![next]);
    assert_eq!(ast.lines(next).value(&fx.source), "---\nnext\n");
    assert_eq!(ast.parent(fx.heading), None);
    assert_eq!(ast.next_sibling(fx.heading), None);
    invariants::check(ast, &fx.source, root);
}

#[test]
fn empty_paragraph_skips_heading_finish() {
    let parser =
        SetextHeadingParser::new(HeadingConfig::new([with_attribute(), with_auto_heading_id()]));
    let mut fx = EmptyParagraphFixture::open("\n===\n", &parser);
    fx.close(&parser);

    assert!(fx.pc.tree().node(fx.heading).attributes().is_empty());
    // No ID was handed out for the discarded heading.
    assert_eq!(fx.pc.ids_mut().generate(""), "heading");
}

#[test]
fn bar_with_trailing_text_does_not_open() {
    let source = Source::new("Title\n--- {#x}\n");
    let mut pc = Context::new();
    let root = pc.tree().root();
    let paragraph = pc.tree_mut().new_node(NodeKind::Paragraph);
    pc.tree_mut().append_child(root, paragraph);
    pc.push_opened(OpenedBlock {
        node: paragraph,
        parser: 0,
    });

    let mut reader = Reader::new(&source);
    reader.advance_line();
    let parser = SetextHeadingParser::new(HeadingConfig::new([with_attribute()]));
    assert!(parser.open(root, &mut reader, &mut pc).is_none());
    assert_eq!(reader.peek_line().unwrap().1.start, 6);
}

#[test]
fn open_requires_paragraph_under_same_parent() {
    let source = Source::new("> a\n---\n");
    let mut pc = Context::new();
    let root = pc.tree().root();
    let quote = pc.tree_mut().new_node(NodeKind::BlockQuote);
    pc.tree_mut().append_child(root, quote);
    let paragraph = pc.tree_mut().new_node(NodeKind::Paragraph);
    pc.tree_mut().append_child(quote, paragraph);
    pc.push_opened(OpenedBlock {
        node: paragraph,
        parser: 0,
    });

    let mut reader = Reader::new(&source);
    reader.advance_line();
    let parser = SetextHeadingParser::default();
    assert!(parser.open(root, &mut reader, &mut pc).is_none());
    assert!(parser.open(quote, &mut reader, &mut pc).is_some());
}

#[test]
#[should_panic(expected = "without a stashed paragraph")]
fn close_without_open_panics() {
    let source = Source::new("---\n");
    let mut pc = Context::new();
    let root = pc.tree().root();
    let heading = pc.tree_mut().new_node(NodeKind::Heading { level: 2 });
    pc.tree_mut().lines_mut(heading).append(Segment::new(0, 4));
    pc.tree_mut().append_child(root, heading);

    let reader = Reader::new(&source);
    SetextHeadingParser::default().close(heading, &reader, &mut pc);
}
