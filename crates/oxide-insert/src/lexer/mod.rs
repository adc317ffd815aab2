//! SQL Lexer/Tokenizer
//!
//! This module provides the case normalizer and a hand-written lexer that
//! produces a stream of tokens whose spans point into the original source.

mod normalize;
mod span;
mod token;
mod tokenizer;

pub use normalize::{Normalized, upper};
pub use span::Span;
pub use token::{Token, TokenKind};
pub use tokenizer::Lexer;
