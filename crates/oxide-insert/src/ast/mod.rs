//! Extraction result types.
//!
//! Every fragment keeps its [`Span`](crate::lexer::Span) so callers can
//! rewrite the original text in place.

mod expression;
mod statement;

pub use expression::Expression;
pub use statement::{InsertStatement, SelectClause, TableRef};
