//! Extraction results for INSERT statements.

use core::fmt;

use serde::Serialize;

use super::expression::Expression;
use crate::lexer::Span;

/// A FROM-clause entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableRef {
    /// The table text as written (identifier chain, inline view or table
    /// function).
    pub table: String,
    /// The alias, empty when there is none.
    pub alias: String,
    /// Where the table text sits in the source.
    pub span: Span,
}

impl TableRef {
    /// Returns true if the reference binds an alias.
    #[must_use]
    pub fn has_alias(&self) -> bool {
        !self.alias.is_empty()
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_alias() {
            write!(f, "{} {}", self.table, self.alias)
        } else {
            f.write_str(&self.table)
        }
    }
}

/// The SELECT feeding an INSERT.
///
/// `projections` and `aliases` always have the same length: `aliases[i]` is
/// the explicit or inferred alias of `projections[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SelectClause {
    /// From the `SELECT` keyword through the last token of the body.
    pub span: Span,
    /// The tables of the first top-level FROM clause.
    pub from_tables: Vec<TableRef>,
    /// The raw text of every select item.
    pub projections: Vec<Span>,
    /// The alias of every select item.
    pub aliases: Vec<Span>,
}

impl fmt::Display for SelectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FROM=[{}], FIELDS=[{}] ALIASES=[{}] TEXT={}",
            join(&self.from_tables),
            join(&self.projections),
            join(&self.aliases),
            self.span
        )
    }
}

/// Everything extracted from one `INSERT INTO` statement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InsertStatement {
    /// The target table, as written.
    pub table: String,
    /// The target column list.
    pub columns: Vec<Span>,
    /// From `INSERT` (or `INTO`) through the column list.
    pub insert_into_span: Span,
    /// The source query, for `INSERT ... SELECT`.
    pub select: Option<SelectClause>,
    /// The top-level items of the first tuple, for `INSERT ... VALUES`.
    pub literal_values: Vec<Span>,
    /// The first `VALUES` tuple as a tree.
    pub values_tree: Option<Expression>,
}

impl InsertStatement {
    /// Returns true if the data comes from a SELECT.
    #[must_use]
    pub const fn is_select(&self) -> bool {
        self.select.is_some()
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] ", self.table, join(&self.columns))?;
        match &self.select {
            Some(select) => write!(f, "{select}"),
            None => write!(f, "[{}]", join(&self.literal_values)),
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
