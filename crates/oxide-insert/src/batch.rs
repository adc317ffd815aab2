//! Batch processing of statement sequences.
//!
//! Every statement is parsed on its own. A statement whose diagnostics carry
//! the `Warning` marker, or whose callback returns a warning, is logged and
//! skipped; any other failure stops the batch.

use core::fmt;
use std::io::Read;

use serde::de::{self, SeqAccess, Visitor};
use tracing::{debug, info, warn};

use crate::ast::InsertStatement;
use crate::parser::{Diagnostics, parse_insert_select};

/// Errors that stop (or, for warnings, skip within) a batch.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Skip the current statement and continue with the next one.
    #[error("WARNING: {0}")]
    Warning(String),

    /// A statement failed to parse.
    #[error("failed to parse statement:\n{text}\n{diagnostics}")]
    Statement {
        /// The statement source text.
        text: String,
        /// Every problem found in it.
        diagnostics: Diagnostics,
    },

    /// The input is not a JSON array of strings.
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while reading the input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A failure reported by the statement callback.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl ExtractError {
    /// Returns true if the error only skips the current statement.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        match self {
            Self::Warning(_) => true,
            Self::Statement { diagnostics, .. } => diagnostics.has_warning(),
            _ => false,
        }
    }
}

/// Counts of what a batch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Statements handed to the callback successfully.
    pub parsed: usize,
    /// Statements skipped because of a warning.
    pub skipped: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} parsed, {} skipped", self.parsed, self.skipped)
    }
}

/// Feeds statements one at a time to a callback.
pub struct Batch<F> {
    walk: F,
    summary: BatchSummary,
}

impl<F> Batch<F>
where
    F: FnMut(&str, InsertStatement) -> Result<(), ExtractError>,
{
    /// Creates a batch calling `walk` for every extracted statement.
    pub fn new(walk: F) -> Self {
        Self {
            walk,
            summary: BatchSummary::default(),
        }
    }

    /// Parses one statement and hands it to the callback.
    ///
    /// # Errors
    ///
    /// Returns the first non-warning failure of the parser or the callback.
    pub fn process(&mut self, text: &str) -> Result<(), ExtractError> {
        let (statement, diagnostics) = parse_insert_select(text);
        let result = match diagnostics.into_result() {
            Ok(()) => (self.walk)(text, statement),
            Err(diagnostics) => Err(ExtractError::Statement {
                text: text.to_owned(),
                diagnostics,
            }),
        };

        match result {
            Ok(()) => {
                debug!(statement = %text, "extracted statement");
                self.summary.parsed += 1;
                Ok(())
            }
            Err(error) if error.is_warning() => {
                warn!(%error, "skipping statement");
                self.summary.skipped += 1;
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Returns the counts so far.
    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        self.summary
    }
}

/// Runs `walk` over every statement of `statements`.
///
/// # Errors
///
/// Stops at the first non-warning failure and returns it.
pub fn parse_batch<I, S, F>(statements: I, walk: F) -> Result<BatchSummary, ExtractError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&str, InsertStatement) -> Result<(), ExtractError>,
{
    let mut batch = Batch::new(walk);
    for text in statements {
        batch.process(text.as_ref())?;
    }
    info!(summary = %batch.summary(), "batch finished");
    Ok(batch.summary())
}

/// Runs `walk` over a JSON array of statement strings read from `reader`.
///
/// Elements are processed as soon as they are decoded, so a failing
/// statement stops the batch without reading the rest of the input.
///
/// # Errors
///
/// Returns `ExtractError::Json` for malformed input, otherwise the first
/// non-warning failure.
pub fn parse_json<R, F>(reader: R, walk: F) -> Result<BatchSummary, ExtractError>
where
    R: Read,
    F: FnMut(&str, InsertStatement) -> Result<(), ExtractError>,
{
    let mut batch = Batch::new(walk);
    let mut failure = None;
    let mut deserializer = serde_json::Deserializer::from_reader(reader);

    let visitor = StatementsVisitor {
        batch: &mut batch,
        failure: &mut failure,
    };
    let decoded = de::Deserializer::deserialize_seq(&mut deserializer, visitor);
    if let Some(error) = failure {
        return Err(error);
    }
    decoded?;
    deserializer.end()?;

    info!(summary = %batch.summary(), "batch finished");
    Ok(batch.summary())
}

/// Drives a [`Batch`] from the elements of a JSON array.
struct StatementsVisitor<'b, F> {
    batch: &'b mut Batch<F>,
    failure: &'b mut Option<ExtractError>,
}

impl<'de, F> Visitor<'de> for StatementsVisitor<'_, F>
where
    F: FnMut(&str, InsertStatement) -> Result<(), ExtractError>,
{
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON array of SQL statement strings")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        while let Some(text) = seq.next_element::<String>()? {
            if let Err(error) = self.batch.process(&text) {
                *self.failure = Some(error);
                return Err(de::Error::custom("batch aborted"));
            }
        }
        Ok(())
    }
}
