//! Token types for the SQL lexer.

use serde::Serialize;

use super::Span;

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// (
    OpenParen,
    /// )
    CloseParen,
    /// ,
    Comma,
    /// Identifier or keyword (e.g. `INSERT`, `t.col`, `"Name"`)
    Atom,
    /// Single-quoted literal (e.g. 'hello')
    String,
    /// Numeric literal (e.g. 42, 3.14)
    Number,
    /// One of `+ - * / = < > || :=`
    Operator,
    /// -- comment
    LineComment,
    /// /* comment */
    BlockComment,
    /// Statement terminator `;` or end of input
    End,
}

impl TokenKind {
    /// Returns a human readable name, used in diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenParen => "'('",
            Self::CloseParen => "')'",
            Self::Comma => "','",
            Self::Atom => "identifier",
            Self::String => "string literal",
            Self::Number => "number",
            Self::Operator => "operator",
            Self::LineComment => "line comment",
            Self::BlockComment => "block comment",
            Self::End => "end of statement",
        }
    }
}

/// A token with its value and its span in the original source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The token value, read from the normalized text. Atoms are upper-case;
    /// string literals and comments hold their contents without delimiters.
    pub value: String,
    /// The location in the original source.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    /// Returns true if this is an End token.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::End)
    }

    /// Returns true for comments, which carry no meaning for the parser.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Returns true if this is an atom spelling `keyword` (upper-case).
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Atom && self.value == keyword
    }

    /// Returns true if this is an atom spelling any of `keywords`.
    #[must_use]
    pub fn is_any_keyword(&self, keywords: &[&str]) -> bool {
        self.kind == TokenKind::Atom && keywords.contains(&self.value.as_str())
    }
}
