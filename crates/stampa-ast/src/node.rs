/*
 * node.rs
 * Copyright (c) 2026 stampa developers
 */

//! Template AST node kinds.
//!
//! The grammar is a closed set: consumers dispatch with an exhaustive match
//! and use [`Node::children`] for the pass-through default, so a traversal
//! that only cares about one kind still visits everything nested inside
//! block bodies.

use crate::expr::{Expr, PathExpr, SubExpr};
use stampa_source_map::Span;

/// A parsed template: the root node list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateAst {
    /// Top-level nodes in source order.
    pub body: Vec<Node>,
}

impl TemplateAst {
    /// Create a template AST from its top-level nodes.
    pub fn new(body: Vec<Node>) -> Self {
        Self { body }
    }
}

/// A node in the template AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text emitted as-is.
    Content(Content),

    /// Interpolation: `{{name}}` or raw `{{{name}}}`
    Interpolation(Interpolation),

    /// Block (conditional or iteration): `{{#if x}}...{{else}}...{{/if}}`
    Block(Block),

    /// Partial inclusion: `{{> header}}`
    Partial(Partial),

    /// Comment (not rendered): `{{!-- note --}}`
    Comment(Comment),
}

impl Node {
    /// Source span of this node.
    pub fn span(&self) -> Span {
        match self {
            Node::Content(content) => content.span,
            Node::Interpolation(interp) => interp.span,
            Node::Block(block) => block.span,
            Node::Partial(partial) => partial.span,
            Node::Comment(comment) => comment.span,
        }
    }

    /// Child nodes, in source order.
    ///
    /// Only blocks have children (body then inverse); every other kind is a
    /// leaf, so a visitor recursing through this method covers the whole
    /// tree.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        let (body, inverse): (&[Node], &[Node]) = match self {
            Node::Block(block) => (&block.body, block.inverse.as_deref().unwrap_or(&[])),
            _ => (&[], &[]),
        };
        body.iter().chain(inverse.iter())
    }
}

/// Literal text node.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    /// The literal text.
    pub text: String,
    /// Source location of this text.
    pub span: Span,
}

/// Interpolation: `{{expr}}` (escaped) or `{{{expr}}}` (raw).
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    /// The interpolated expression.
    pub expr: Expr,
    /// Whether the output is emitted unescaped (`{{{...}}}`).
    pub raw: bool,
    /// Source location of the whole tag.
    pub span: Span,
}

/// Block: `{{#call args}}body{{else}}inverse{{/call}}`.
///
/// Conditionals and iteration are both blocks; the grammar does not
/// distinguish them, the runtime helper named by `call` does.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The block helper or data path (`if`, `each`, ...).
    pub call: PathExpr,
    /// Positional arguments.
    pub args: Vec<Expr>,
    /// Main body.
    pub body: Vec<Node>,
    /// Optional `{{else}}` body.
    pub inverse: Option<Vec<Node>>,
    /// Source location of the whole block.
    pub span: Span,
}

/// Partial inclusion: `{{> name}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Partial {
    /// The referenced partial name.
    pub name: PartialName,
    /// Positional arguments passed to the partial.
    pub args: Vec<Expr>,
    /// Source location of the whole tag.
    pub span: Span,
}

/// The name position of a partial tag.
#[derive(Debug, Clone, PartialEq)]
pub enum PartialName {
    /// A literal identifier, resolvable at compile time: `{{> header}}`
    Literal {
        name: String,
        span: Span,
    },

    /// A sub-expression computed at render time: `{{> (whichPartial)}}`
    Dynamic(SubExpr),
}

impl PartialName {
    /// Source span of the name expression.
    pub fn span(&self) -> Span {
        match self {
            PartialName::Literal { span, .. } => *span,
            PartialName::Dynamic(sub) => sub.span,
        }
    }
}

/// Comment node, never rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// The comment text.
    pub text: String,
    /// Source location of this comment.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::StringLit;
    use pretty_assertions::assert_eq;

    fn content(text: &str) -> Node {
        Node::Content(Content {
            text: text.to_string(),
            span: Span::default(),
        })
    }

    fn literal_partial(name: &str) -> Node {
        Node::Partial(Partial {
            name: PartialName::Literal {
                name: name.to_string(),
                span: Span::default(),
            },
            args: Vec::new(),
            span: Span::default(),
        })
    }

    #[test]
    fn test_leaf_nodes_have_no_children() {
        assert_eq!(content("hi").children().count(), 0);
        assert_eq!(literal_partial("header").children().count(), 0);
    }

    #[test]
    fn test_block_children_cover_body_and_inverse() {
        let block = Node::Block(Block {
            call: PathExpr::new(["if"], Span::default()),
            args: vec![Expr::Path(PathExpr::new(["show"], Span::default()))],
            body: vec![content("yes"), literal_partial("header")],
            inverse: Some(vec![content("no")]),
            span: Span::default(),
        });

        let texts: Vec<_> = block.children().collect();
        assert_eq!(texts.len(), 3);
        assert!(matches!(texts[2], Node::Content(c) if c.text == "no"));
    }

    #[test]
    fn test_block_without_inverse() {
        let block = Node::Block(Block {
            call: PathExpr::new(["each"], Span::default()),
            args: vec![Expr::Path(PathExpr::new(["items"], Span::default()))],
            body: vec![content("row")],
            inverse: None,
            span: Span::default(),
        });
        assert_eq!(block.children().count(), 1);
    }

    #[test]
    fn test_partial_name_span() {
        let span = Span::new(
            stampa_source_map::Location::new(4, 0, 4),
            stampa_source_map::Location::new(10, 0, 10),
        );
        let name = PartialName::Literal {
            name: "header".to_string(),
            span,
        };
        assert_eq!(name.span(), span);
    }

    #[test]
    fn test_dynamic_partial_name() {
        let sub = SubExpr::new(
            PathExpr::new(["whichPartial"], Span::default()),
            vec![Expr::String(StringLit {
                value: "row".to_string(),
                span: Span::default(),
            })],
            Span::default(),
        );
        let name = PartialName::Dynamic(sub);
        assert!(matches!(name, PartialName::Dynamic(_)));
    }
}
