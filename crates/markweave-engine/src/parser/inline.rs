use std::convert::Infallible;

use crate::ast::{Ast, NodeId, NodeKind, WalkStatus, walk};
use crate::text::Source;

/// Turns the lines of every paragraph and heading into `Text` children.
///
/// Each line is trimmed on both sides; blank lines produce nothing. Every
/// text node except the block's last carries a soft break.
pub fn parse_text(ast: &mut Ast, source: &Source) {
    let mut targets = Vec::new();
    let collected: Result<(), Infallible> = walk(ast, ast.root(), |node, entering| {
        if !entering {
            return Ok(WalkStatus::Continue);
        }
        Ok(match ast.kind(node) {
            NodeKind::Paragraph | NodeKind::Heading { .. } => {
                targets.push(node);
                WalkStatus::SkipChildren
            }
            NodeKind::FencedCode { .. } => WalkStatus::SkipChildren,
            _ => WalkStatus::Continue,
        })
    });
    let Ok(()) = collected;

    for node in targets {
        add_text_children(ast, source, node);
    }
}

fn add_text_children(ast: &mut Ast, source: &Source, node: NodeId) {
    let segments: Vec<_> = ast
        .lines(node)
        .iter()
        .map(|seg| seg.trim_left_space(source).trim_right_space(source))
        .filter(|seg| !seg.is_empty())
        .collect();
    let count = segments.len();
    for (i, segment) in segments.into_iter().enumerate() {
        let text = ast.new_node(NodeKind::Text {
            segment,
            soft_break: i + 1 < count,
        });
        ast.append_child(node, text);
    }
}
