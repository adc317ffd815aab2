//! Opaque expression trees.

use serde::Serialize;

use crate::lexer::{Span, Token, TokenKind};

/// A token run where each parenthesized group is a nested node.
///
/// This is not an SQL expression grammar: operators, commas and keywords
/// are plain leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expression {
    /// A single token.
    Leaf(Token),
    /// A parenthesized group.
    Group {
        /// The contents between the parentheses.
        children: Vec<Expression>,
        /// From the opening `(` through the closing `)`, or through the last
        /// collected token when the input ran out first.
        span: Span,
        /// False when the input ended before the matching `)`.
        closed: bool,
    },
}

impl Expression {
    /// Returns the leaf value, `None` for a group.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.token().map(|t| t.value.as_str())
    }

    /// Returns the leaf token, `None` for a group.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        match self {
            Self::Leaf(token) => Some(token),
            Self::Group { .. } => None,
        }
    }

    /// Returns the children of a group; a leaf has none.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Leaf(_) => &[],
            Self::Group { children, .. } => children,
        }
    }

    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::Leaf(token) => &token.span,
            Self::Group { span, .. } => span,
        }
    }

    /// Returns true for a leaf of the given kind.
    #[must_use]
    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.token().is_some_and(|t| t.kind == kind)
    }

    /// Returns true for an atom leaf spelling `keyword`.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.token().is_some_and(|t| t.is_keyword(keyword))
    }

    /// Returns true for an atom leaf spelling any of `keywords`.
    #[must_use]
    pub fn is_any_keyword(&self, keywords: &[&str]) -> bool {
        self.token().is_some_and(|t| t.is_any_keyword(keywords))
    }
}
