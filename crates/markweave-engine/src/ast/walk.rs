use super::{Ast, NodeId};

/// What a visitor wants the walk to do next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalkStatus {
    /// Keep going.
    #[default]
    Continue,
    /// Do not descend into this node's children. Only meaningful when
    /// entering; the leaving visit still happens.
    SkipChildren,
    /// Abort the whole walk.
    Stop,
}

/// Depth-first walk calling `visit(node, entering)` before and after each
/// node's children. An `Err` from the visitor aborts the walk and is returned.
pub fn walk<E, F>(ast: &Ast, node: NodeId, mut visit: F) -> Result<(), E>
where
    F: FnMut(NodeId, bool) -> Result<WalkStatus, E>,
{
    walk_node(ast, node, &mut visit).map(|_| ())
}

fn walk_node<E, F>(ast: &Ast, node: NodeId, visit: &mut F) -> Result<WalkStatus, E>
where
    F: FnMut(NodeId, bool) -> Result<WalkStatus, E>,
{
    let status = visit(node, true)?;
    if status == WalkStatus::Stop {
        return Ok(WalkStatus::Stop);
    }
    if status != WalkStatus::SkipChildren {
        let mut child = ast.first_child(node);
        while let Some(c) = child {
            if walk_node(ast, c, visit)? == WalkStatus::Stop {
                return Ok(WalkStatus::Stop);
            }
            child = ast.next_sibling(c);
        }
    }
    if visit(node, false)? == WalkStatus::Stop {
        return Ok(WalkStatus::Stop);
    }
    Ok(WalkStatus::Continue)
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::ast::NodeKind;
    use pretty_assertions::assert_eq;

    /// root -> [quote -> [p1], p2]
    fn sample() -> (Ast, NodeId, NodeId, NodeId) {
        let mut ast = Ast::new();
        let root = ast.root();
        let quote = ast.new_node(NodeKind::BlockQuote);
        let p1 = ast.new_node(NodeKind::Paragraph);
        let p2 = ast.new_node(NodeKind::Paragraph);
        ast.append_child(root, quote);
        ast.append_child(quote, p1);
        ast.append_child(root, p2);
        (ast, quote, p1, p2)
    }

    fn trace(ast: &Ast, stop_or_skip: impl Fn(NodeId, bool) -> WalkStatus) -> Vec<(usize, bool)> {
        let mut seen = vec![];
        walk(ast, ast.root(), |n, entering| {
            seen.push((n.index(), entering));
            Ok::<_, Infallible>(stop_or_skip(n, entering))
        })
        .unwrap();
        seen
    }

    #[test]
    fn visits_pre_and_post_order() {
        let (ast, quote, p1, p2) = sample();
        let seen = trace(&ast, |_, _| WalkStatus::Continue);
        let (r, q, a, b) = (0, quote.index(), p1.index(), p2.index());
        assert_eq!(
            seen,
            vec![
                (r, true),
                (q, true),
                (a, true),
                (a, false),
                (q, false),
                (b, true),
                (b, false),
                (r, false)
            ]
        );
    }

    #[test]
    fn skip_children_still_leaves() {
        let (ast, quote, p1, _) = sample();
        let seen = trace(&ast, |n, _| {
            if n == quote {
                WalkStatus::SkipChildren
            } else {
                WalkStatus::Continue
            }
        });
        assert!(seen.contains(&(quote.index(), false)));
        assert!(!seen.iter().any(|(i, _)| *i == p1.index()));
    }

    #[test]
    fn stop_aborts_everything() {
        let (ast, _, p1, p2) = sample();
        let seen = trace(&ast, |n, _| {
            if n == p1 {
                WalkStatus::Stop
            } else {
                WalkStatus::Continue
            }
        });
        assert_eq!(seen.last(), Some(&(p1.index(), true)));
        assert!(!seen.iter().any(|(i, _)| *i == p2.index()));
    }

    #[test]
    fn errors_propagate() {
        let (ast, _, p1, _) = sample();
        let result = walk(&ast, ast.root(), |n, _| {
            if n == p1 {
                Err("boom")
            } else {
                Ok(WalkStatus::Continue)
            }
        });
        assert_eq!(result, Err("boom"));
    }
}
