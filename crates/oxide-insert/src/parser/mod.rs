//! INSERT statement parser
//!
//! A small state machine recognizes the `INSERT INTO` shape, a generic
//! parenthesis-aware tree builder keeps nested expressions opaque, and the
//! select extractor reads projections and FROM tables out of the query.

mod diagnostics;
mod error;
#[allow(clippy::module_inception)]
mod parser;
mod select;
mod tree;

pub use diagnostics::Diagnostics;
pub use error::ParseError;
pub use parser::{Parser, parse_insert_select};
pub use select::SelectExtractor;
pub use tree::{TokenStream, build_group, build_sequence, span_of, split_commas};
