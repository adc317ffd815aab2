//! # oxide-insert
//!
//! Span-preserving extraction of `INSERT INTO ... SELECT` and
//! `INSERT INTO ... VALUES` statements.
//!
//! This crate provides:
//! - A case normalizer and a hand-written lexer whose spans point into the
//!   original text
//! - A state machine recognizing the INSERT shape, with a generic
//!   parenthesis-aware tree builder for nested expressions
//! - Select extraction: projections, inferred or explicit aliases and FROM
//!   tables
//! - A batch driver that skips warning-class statements and stops on
//!   anything else
//! - Text-preserving rewriting through the recorded spans
//!
//! ## Extracting a statement
//!
//! ```rust
//! use oxide_insert::parse_insert_select;
//!
//! let sql = "INSERT INTO tbl (a, b) SELECT x, y AS b2 FROM Tbl2 t2";
//! let (insert, diagnostics) = parse_insert_select(sql);
//! assert!(diagnostics.is_empty());
//!
//! assert_eq!(insert.table, "tbl");
//! let select = insert.select.unwrap();
//! assert_eq!(select.aliases[0].text, "x");
//! assert_eq!(select.aliases[1].text, "b2");
//! assert_eq!(select.from_tables[0].alias, "t2");
//!
//! // Every span is an exact slice of the input.
//! let b2 = &select.aliases[1];
//! assert_eq!(&sql[b2.start..=b2.stop], "b2");
//! ```
//!
//! ## Rewriting
//!
//! ```rust
//! use std::collections::HashMap;
//! use oxide_insert::{parse_insert_select, rewrite::rename_columns};
//!
//! let sql = "insert into t (a, b) values (1, 2)";
//! let (insert, _) = parse_insert_select(sql);
//! let renames = HashMap::from([(String::from("B"), String::from("c"))]);
//! assert_eq!(
//!     rename_columns(sql, &insert, &renames).unwrap(),
//!     "insert into t (a, c) values (1, 2)"
//! );
//! ```

pub mod ast;
pub mod batch;
pub mod lexer;
pub mod parser;
pub mod rewrite;

pub use ast::{Expression, InsertStatement, SelectClause, TableRef};
pub use batch::{Batch, BatchSummary, ExtractError, parse_batch, parse_json};
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{Diagnostics, ParseError, Parser, parse_insert_select};
