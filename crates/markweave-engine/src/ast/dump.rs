use std::fmt::Write as _;

use crate::text::{Source, preview};

use super::{Ast, FenceKind, NodeId, NodeKind};

/// Renders a subtree as an indented outline, one node per line.
///
/// Text is previewed (truncated) for readability. Leaf blocks without
/// inline children list their raw lines prefixed with `|`.
///
/// ```text
/// Document
///   Heading(1) {id="title"}
///     Text "Title"
/// ```
pub fn dump(ast: &Ast, source: &Source, node: NodeId) -> String {
    let mut out = String::new();
    dump_node(ast, source, node, 0, &mut out);
    out
}

fn dump_node(ast: &Ast, source: &Source, node: NodeId, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push_str(&label(ast, source, node));

    let attributes = ast.node(node).attributes();
    if !attributes.is_empty() {
        let joined = attributes
            .iter()
            .map(|(k, v)| format!("{k}={v:?}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(out, " {{{joined}}}");
    }
    out.push('\n');

    if ast.first_child(node).is_none() {
        for seg in ast.lines(node).iter() {
            let text = preview(source, seg, 60);
            let text = text.trim_end_matches(['\r', '\n']);
            if text.is_empty() {
                let _ = writeln!(out, "{indent}  |");
            } else {
                let _ = writeln!(out, "{indent}  | {text}");
            }
        }
    }
    for child in ast.children(node) {
        dump_node(ast, source, child, depth + 1, out);
    }
}

fn label(ast: &Ast, source: &Source, node: NodeId) -> String {
    match ast.kind(node) {
        NodeKind::Heading { level } => format!("Heading({level})"),
        NodeKind::FencedCode { fence, info } => {
            let fence = match fence {
                FenceKind::Backticks => "Backticks",
                FenceKind::Tildes => "Tildes",
            };
            match info {
                Some(info) => format!("FencedCode({fence}) info={:?}", preview(source, *info, 40)),
                None => format!("FencedCode({fence})"),
            }
        }
        NodeKind::Text {
            segment,
            soft_break,
        } => {
            let text = preview(source, *segment, 60);
            if *soft_break {
                format!("Text {text:?} +soft")
            } else {
                format!("Text {text:?}")
            }
        }
        other => other.name().to_string(),
    }
}
