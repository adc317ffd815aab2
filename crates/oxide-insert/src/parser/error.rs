//! Parser error types.

use crate::lexer::{Span, Token};

/// A problem found while extracting one statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// An unknown character or an unterminated literal. Aborts the statement.
    #[error("{message} at offset {offset}")]
    Lex {
        /// The error message.
        message: String,
        /// Byte offset into the original source.
        offset: usize,
    },

    /// A token where the statement shape requires something else.
    #[error("{message} at {}..={}", span.start, span.stop)]
    Syntax {
        /// The error message.
        message: String,
        /// The offending fragment.
        span: Span,
    },

    /// A known, intentionally unsupported pattern: skip the statement and
    /// keep processing the batch.
    #[error("WARNING: {0}")]
    Warning(String),
}

impl ParseError {
    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: &str, found: &Token) -> Self {
        Self::Syntax {
            message: format!(
                "unexpected {} {:?}: expected {expected}",
                found.kind.as_str(),
                found.span.text
            ),
            span: found.span.clone(),
        }
    }

    /// Creates an "unexpected end of statement" error.
    #[must_use]
    pub fn unexpected_end(expected: &str, offset: usize) -> Self {
        Self::Syntax {
            message: format!("unexpected end of statement: expected {expected}"),
            span: Span::empty(offset),
        }
    }

    /// Returns true for the `Warning` marker.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }
}
