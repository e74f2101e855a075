/*
 * expr.rs
 * Copyright (c) 2026 stampa developers
 */

//! Expression types appearing inside template tags.

use stampa_source_map::Span;

/// An expression inside a tag: an argument, a hash value, or a computed
/// partial name.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Dotted data reference: `user.name`
    Path(PathExpr),

    /// String literal: `"title"`
    String(StringLit),

    /// Number literal: `42`
    Number(NumberLit),

    /// Boolean literal: `true`
    Boolean(BoolLit),

    /// Parenthesized call evaluated at render time: `(lookup . "key")`
    SubExpr(SubExpr),
}

impl Expr {
    /// Source span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Path(path) => path.span,
            Expr::String(lit) => lit.span,
            Expr::Number(lit) => lit.span,
            Expr::Boolean(lit) => lit.span,
            Expr::SubExpr(sub) => sub.span,
        }
    }
}

/// A dotted data reference.
#[derive(Debug, Clone, PartialEq)]
pub struct PathExpr {
    /// Path components (e.g. `["user", "name"]` for `user.name`).
    pub parts: Vec<String>,
    /// Source location of this path.
    pub span: Span,
}

impl PathExpr {
    /// Create a new path expression.
    pub fn new(parts: impl IntoIterator<Item = impl Into<String>>, span: Span) -> Self {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
            span,
        }
    }

    /// The path joined back into its source form.
    pub fn dotted(&self) -> String {
        self.parts.join(".")
    }
}

/// A string literal.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLit {
    pub value: String,
    pub span: Span,
}

/// A number literal.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLit {
    pub value: f64,
    pub span: Span,
}

/// A boolean literal.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolLit {
    pub value: bool,
    pub span: Span,
}

/// A parenthesized call whose result is only known at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct SubExpr {
    /// The called helper or data path.
    pub call: PathExpr,
    /// Positional arguments.
    pub args: Vec<Expr>,
    /// Source location of the whole sub-expression.
    pub span: Span,
}

impl SubExpr {
    /// Create a new sub-expression.
    pub fn new(call: PathExpr, args: Vec<Expr>, span: Span) -> Self {
        Self { call, args, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_path_dotted() {
        let path = PathExpr::new(["user", "name"], Span::default());
        assert_eq!(path.dotted(), "user.name");
        assert_eq!(path.parts.len(), 2);
    }

    #[test]
    fn test_expr_span() {
        let span = Span::new(
            stampa_source_map::Location::new(3, 0, 3),
            stampa_source_map::Location::new(7, 0, 7),
        );
        let expr = Expr::Path(PathExpr::new(["x"], span));
        assert_eq!(expr.span(), span);
    }

    #[test]
    fn test_sub_expr() {
        let call = PathExpr::new(["lookup"], Span::default());
        let arg = Expr::String(StringLit {
            value: "key".to_string(),
            span: Span::default(),
        });
        let sub = SubExpr::new(call, vec![arg], Span::default());
        assert_eq!(sub.call.dotted(), "lookup");
        assert_eq!(sub.args.len(), 1);
    }
}
