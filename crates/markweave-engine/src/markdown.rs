use std::io::Write;

use crate::error::RenderError;
use crate::parser::Parser;
use crate::renderer::Renderer;
use crate::text::Source;

/// A parser and a renderer used together.
#[derive(Debug, Default)]
pub struct Markdown {
    parser: Parser,
    renderer: Renderer,
}

impl Markdown {
    #[must_use]
    pub fn new(parser: Parser, renderer: Renderer) -> Self {
        Self { parser, renderer }
    }

    #[must_use]
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    #[must_use]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Parses `text` and renders the result into `sink`.
    pub fn convert<W: Write>(&self, text: &str, sink: W) -> Result<(), RenderError> {
        let source = Source::new(text);
        let ast = self.parser.parse(&source);
        self.renderer.render(sink, &source, &ast, ast.root())
    }

    /// Like [`convert`](Self::convert), collecting the output into a string.
    pub fn to_html(&self, text: &str) -> Result<String, RenderError> {
        let mut out = Vec::new();
        self.convert(text, &mut out)?;
        String::from_utf8(out)
            .map_err(|e| RenderError::node("Document", format!("output is not UTF-8: {e}")))
    }
}
