/*
 * scan.rs
 * Copyright (c) 2026 stampa developers
 */

//! Static partial-dependency discovery.
//!
//! Walks a template AST and collects every statically referenced partial
//! name, in encounter order. Occurrences are not deduplicated: each one
//! drives one import statement in the generated module, and module systems
//! collapse identical specifiers downstream, so duplicates are harmless but
//! observable. Dynamically computed partial names defeat static discovery
//! and fail immediately, before precompilation is attempted.

use stampa_ast::{Node, PartialName, TemplateAst};
use stampa_source_map::Span;
use thiserror::Error;

/// One occurrence of a statically referenced partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialReference {
    /// The name as written in the template.
    pub raw_name: String,
    /// Where the reference occurs.
    pub span: Span,
}

/// A partial reference whose name is computed at render time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dynamic partial names are not supported")]
pub struct DynamicPartial {
    /// Location of the computed name expression.
    pub span: Span,
}

/// Collect every static partial reference in the template, in order.
///
/// Never mutates the AST.
pub fn scan(ast: &TemplateAst) -> Result<Vec<PartialReference>, DynamicPartial> {
    let mut references = Vec::new();
    for node in &ast.body {
        scan_node(node, &mut references)?;
    }
    Ok(references)
}

fn scan_node(node: &Node, references: &mut Vec<PartialReference>) -> Result<(), DynamicPartial> {
    match node {
        Node::Partial(partial) => match &partial.name {
            PartialName::Literal { name, span } => {
                references.push(PartialReference {
                    raw_name: name.clone(),
                    span: *span,
                });
                Ok(())
            }
            PartialName::Dynamic(sub) => Err(DynamicPartial { span: sub.span }),
        },
        // Every other node kind passes through to its children.
        Node::Content(_) | Node::Interpolation(_) | Node::Block(_) | Node::Comment(_) => {
            for child in node.children() {
                scan_node(child, references)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stampa_ast::{Block, Content, Expr, Partial, PathExpr, SubExpr};

    fn content(text: &str) -> Node {
        Node::Content(Content {
            text: text.to_string(),
            span: Span::default(),
        })
    }

    fn partial(name: &str) -> Node {
        Node::Partial(Partial {
            name: PartialName::Literal {
                name: name.to_string(),
                span: Span::default(),
            },
            args: Vec::new(),
            span: Span::default(),
        })
    }

    fn dynamic_partial() -> Node {
        Node::Partial(Partial {
            name: PartialName::Dynamic(SubExpr::new(
                PathExpr::new(["whichPartial"], Span::default()),
                Vec::new(),
                Span::default(),
            )),
            args: Vec::new(),
            span: Span::default(),
        })
    }

    fn block(body: Vec<Node>, inverse: Option<Vec<Node>>) -> Node {
        Node::Block(Block {
            call: PathExpr::new(["if"], Span::default()),
            args: vec![Expr::Path(PathExpr::new(["x"], Span::default()))],
            body,
            inverse,
            span: Span::default(),
        })
    }

    fn names(references: &[PartialReference]) -> Vec<&str> {
        references.iter().map(|r| r.raw_name.as_str()).collect()
    }

    #[test]
    fn test_no_partials() {
        let ast = TemplateAst::new(vec![content("Hello")]);
        assert!(scan(&ast).unwrap().is_empty());
    }

    #[test]
    fn test_collects_in_encounter_order() {
        let ast = TemplateAst::new(vec![
            partial("header"),
            content("body"),
            partial("footer"),
        ]);
        assert_eq!(names(&scan(&ast).unwrap()), vec!["header", "footer"]);
    }

    #[test]
    fn test_duplicates_preserved() {
        let ast = TemplateAst::new(vec![partial("header"), partial("header")]);
        assert_eq!(names(&scan(&ast).unwrap()), vec!["header", "header"]);
    }

    #[test]
    fn test_descends_into_block_body_and_inverse() {
        let ast = TemplateAst::new(vec![block(
            vec![partial("row"), block(vec![partial("cell")], None)],
            Some(vec![partial("empty")]),
        )]);
        assert_eq!(names(&scan(&ast).unwrap()), vec!["row", "cell", "empty"]);
    }

    #[test]
    fn test_dynamic_partial_fails() {
        let ast = TemplateAst::new(vec![content("a"), dynamic_partial()]);
        assert!(scan(&ast).is_err());
    }

    #[test]
    fn test_dynamic_partial_fails_inside_block() {
        let ast = TemplateAst::new(vec![block(vec![dynamic_partial()], None)]);
        assert!(scan(&ast).is_err());
    }
}
