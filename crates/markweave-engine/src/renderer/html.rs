use std::io::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::ast::{Ast, NodeId, NodeKind, WalkStatus};
use crate::error::RenderError;
use crate::text::Source;

use super::{NodeRenderer, OptionName, OptionValue, Outcome, SetOptioner};

/// Render soft line breaks as `<br>`.
pub const HARD_WRAPS: &str = "hard_wraps";
/// Self-close void elements (`<br />`).
pub const XHTML: &str = "xhtml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlConfig {
    pub hard_wraps: bool,
    pub xhtml: bool,
}

/// Serializes every built-in node kind to HTML.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    config: HtmlConfig,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new(config: HtmlConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> HtmlConfig {
        self.config
    }

    fn line_break(&self) -> &'static str {
        match (self.config.hard_wraps, self.config.xhtml) {
            (false, _) => "\n",
            (true, false) => "<br>\n",
            (true, true) => "<br />\n",
        }
    }
}

impl SetOptioner for HtmlRenderer {
    fn set_option(&mut self, name: &OptionName, value: &OptionValue) {
        let Some(flag) = value.as_bool() else {
            return;
        };
        match name.as_str() {
            HARD_WRAPS => self.config.hard_wraps = flag,
            XHTML => self.config.xhtml = flag,
            _ => {}
        }
    }
}

impl NodeRenderer for HtmlRenderer {
    fn render(
        &self,
        w: &mut dyn Write,
        source: &Source,
        ast: &Ast,
        node: NodeId,
        entering: bool,
    ) -> Result<Outcome, RenderError> {
        match ast.kind(node) {
            NodeKind::Document => {}
            NodeKind::Paragraph => {
                w.write_all(if entering { "<p>" } else { "</p>\n" }.as_bytes())?;
            }
            NodeKind::Heading { level } => {
                if !(1..=6).contains(level) {
                    return Err(RenderError::node(
                        "Heading",
                        format!("level {level} is outside 1..=6"),
                    ));
                }
                if entering {
                    write!(w, "<h{level}")?;
                    for (name, value) in ast.node(node).attributes() {
                        write!(w, " {name}=\"{}\"", encode_double_quoted_attribute(value))?;
                    }
                    w.write_all(b">")?;
                } else {
                    writeln!(w, "</h{level}>")?;
                }
            }
            NodeKind::BlockQuote => {
                let tag = if entering {
                    "<blockquote>\n"
                } else {
                    "</blockquote>\n"
                };
                w.write_all(tag.as_bytes())?;
            }
            NodeKind::FencedCode { info, .. } => {
                if entering {
                    w.write_all(b"<pre><code")?;
                    if let Some(info) = info {
                        let info = info.value(source);
                        if let Some(language) = info.split_whitespace().next() {
                            write!(
                                w,
                                " class=\"language-{}\"",
                                encode_double_quoted_attribute(language)
                            )?;
                        }
                    }
                    w.write_all(b">")?;
                    for line in ast.lines(node).iter() {
                        w.write_all(encode_text(&line.value(source)).as_bytes())?;
                    }
                    w.write_all(b"</code></pre>\n")?;
                }
                return Ok(Outcome::Claimed(WalkStatus::SkipChildren));
            }
            NodeKind::Text {
                segment,
                soft_break,
            } => {
                if entering {
                    w.write_all(encode_text(&segment.value(source)).as_bytes())?;
                    if *soft_break {
                        w.write_all(self.line_break().as_bytes())?;
                    }
                }
            }
        }
        Ok(Outcome::Claimed(WalkStatus::Continue))
    }

    fn as_set_optioner(&mut self) -> Option<&mut dyn SetOptioner> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Segment;

    #[test]
    fn options_toggle_line_breaks() {
        let mut r = HtmlRenderer::default();
        assert_eq!(r.line_break(), "\n");
        r.set_option(&HARD_WRAPS.into(), &true.into());
        assert_eq!(r.line_break(), "<br>\n");
        r.set_option(&XHTML.into(), &true.into());
        assert_eq!(r.line_break(), "<br />\n");
    }

    #[test]
    fn unknown_and_mistyped_options_are_ignored() {
        let mut r = HtmlRenderer::default();
        r.set_option(&"smartypants".into(), &true.into());
        r.set_option(&HARD_WRAPS.into(), &"yes".into());
        assert_eq!(r.config(), HtmlConfig::default());
    }

    #[test]
    fn text_is_escaped() {
        let source = Source::new("a < b & c");
        let mut ast = Ast::new();
        let text = ast.new_node(NodeKind::Text {
            segment: Segment::new(0, source.len()),
            soft_break: false,
        });
        ast.append_child(ast.root(), text);
        let mut out = Vec::<u8>::new();
        HtmlRenderer::default()
            .render(&mut out, &source, &ast, text, true)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a &lt; b &amp; c");
    }

    #[test]
    fn bad_heading_level_is_an_error() {
        let source = Source::new("");
        let mut ast = Ast::new();
        let h = ast.new_node(NodeKind::Heading { level: 9 });
        let err = HtmlRenderer::default()
            .render(&mut Vec::<u8>::new(), &source, &ast, h, true)
            .unwrap_err();
        assert!(matches!(err, RenderError::Node { kind: "Heading", .. }));
    }
}
