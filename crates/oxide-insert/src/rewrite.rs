//! Text-preserving rewriting of extracted statements.
//!
//! Edits replace exact spans of the original source; every byte outside the
//! replaced spans is kept as written.

use std::collections::HashMap;

use crate::ast::InsertStatement;
use crate::lexer::Span;

/// Errors that can occur while applying edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// An edit reaches past the end of the source or splits a character.
    #[error("span {start}..={stop} is outside the source")]
    OutOfBounds {
        /// Start byte offset.
        start: usize,
        /// Stop byte offset.
        stop: usize,
    },

    /// Two edits touch the same bytes.
    #[error("span {start}..={stop} overlaps a previous edit")]
    Overlap {
        /// Start byte offset.
        start: usize,
        /// Stop byte offset.
        stop: usize,
    },
}

/// Collects span replacements and applies them in one pass.
#[derive(Debug, Clone)]
pub struct Rewriter<'a> {
    source: &'a str,
    edits: Vec<(Span, String)>,
}

impl<'a> Rewriter<'a> {
    /// Creates a rewriter over `source`.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    /// Queues the replacement of `span` by `text`.
    pub fn replace(&mut self, span: &Span, text: impl Into<String>) -> &mut Self {
        self.edits.push((span.clone(), text.into()));
        self
    }

    /// Returns true if no edit was queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Applies the queued edits.
    ///
    /// # Errors
    ///
    /// Returns `RewriteError` if an edit is outside the source or overlaps
    /// another one.
    pub fn finish(mut self) -> Result<String, RewriteError> {
        self.edits.sort_by_key(|(span, _)| span.start);

        let mut out = String::with_capacity(self.source.len());
        let mut copied = 0;
        for (span, text) in &self.edits {
            if span.start < copied {
                return Err(RewriteError::Overlap {
                    start: span.start,
                    stop: span.stop,
                });
            }
            let (Some(before), Some(_)) = (
                self.source.get(copied..span.start),
                self.source.get(span.start..=span.stop),
            ) else {
                return Err(RewriteError::OutOfBounds {
                    start: span.start,
                    stop: span.stop,
                });
            };
            out.push_str(before);
            out.push_str(text);
            copied = span.end();
        }
        out.push_str(&self.source[copied..]);
        Ok(out)
    }
}

/// Renames target columns of `statement`, matching names case-insensitively.
///
/// # Errors
///
/// Returns `RewriteError` if the statement's spans do not belong to
/// `source`.
pub fn rename_columns<S: std::hash::BuildHasher>(
    source: &str,
    statement: &InsertStatement,
    renames: &HashMap<String, String, S>,
) -> Result<String, RewriteError> {
    let lookup: HashMap<String, &String> = renames
        .iter()
        .map(|(from, to)| (from.to_uppercase(), to))
        .collect();

    let mut rewriter = Rewriter::new(source);
    for column in &statement.columns {
        if let Some(to) = lookup.get(&column.text.to_uppercase()) {
            rewriter.replace(column, to.as_str());
        }
    }
    rewriter.finish()
}
