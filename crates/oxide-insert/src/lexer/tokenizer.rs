//! SQL Tokenizer implementation.

use super::{Normalized, Span, Token, TokenKind};
use crate::parser::ParseError;

/// A lexer that tokenizes one SQL statement.
///
/// Scanning runs over the upper-cased text while every span is reported
/// against the original source.
pub struct Lexer<'a> {
    /// The original source text.
    source: &'a str,
    /// The upper-cased text being scanned.
    normalized: Normalized,
    /// The current byte position in the normalized text.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            normalized: Normalized::new(source),
            pos: 0,
            start: 0,
        }
    }

    /// Returns the original source text.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the normalized text not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.normalized.as_str()[self.pos..]
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.remaining().chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        self.advance_while(char::is_whitespace);
    }

    /// Creates a span from start to current position.
    fn make_span(&self) -> Span {
        match self.normalized.source_range(self.start, self.pos) {
            Some((start, stop)) => Span::from_source(self.source, start, stop),
            None => Span::empty(self.source_offset(self.start)),
        }
    }

    fn source_offset(&self, offset: usize) -> usize {
        self.normalized.source_offset(offset, self.source.len())
    }

    /// Creates a token whose value is the scanned normalized text.
    fn make_token(&self, kind: TokenKind) -> Token {
        let value = &self.normalized.as_str()[self.start..self.pos];
        Token::new(kind, value, self.make_span())
    }

    /// Creates a token whose value is the scanned text minus delimiters.
    fn make_delimited(&self, kind: TokenKind, open: usize, close: usize) -> Token {
        let value = &self.normalized.as_str()[self.start + open..self.pos - close];
        Token::new(kind, value, self.make_span())
    }

    /// Builds a lex error at the token start and stops tokenizing.
    fn fail(&mut self, message: String) -> ParseError {
        let offset = self.source_offset(self.start);
        self.pos = self.normalized.as_str().len();
        ParseError::Lex { message, offset }
    }

    /// Scans a line comment, up to (not including) the next newline.
    fn scan_line_comment(&mut self) -> Token {
        self.pos += 2;
        self.advance_while(|c| c != '\n');
        self.make_delimited(TokenKind::LineComment, 2, 0)
    }

    /// Scans a (non-nesting) block comment.
    fn scan_block_comment(&mut self) -> Result<Token, ParseError> {
        let body = self.pos + 2;
        match self.normalized.as_str()[body..].find("*/") {
            Some(i) => {
                self.pos = body + i + 2;
                Ok(self.make_delimited(TokenKind::BlockComment, 2, 2))
            }
            None => Err(self.fail(String::from("unterminated block comment"))),
        }
    }

    /// Scans a string literal up to the next quote.
    fn scan_string(&mut self) -> Result<Token, ParseError> {
        let body = self.pos + 1;
        match self.normalized.as_str()[body..].find('\'') {
            Some(i) => {
                self.pos = body + i + 1;
                Ok(self.make_delimited(TokenKind::String, 1, 1))
            }
            None => Err(self.fail(String::from("unterminated string literal"))),
        }
    }

    /// Scans the next token.
    ///
    /// Once the input is exhausted every call yields an End token.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError::Lex` for an unknown character or an
    /// unterminated literal or comment. Tokenizing stops there: later calls
    /// yield End.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return Ok(self.make_token(TokenKind::End));
        };

        match (c, self.peek_next()) {
            ('-', Some('-')) => return Ok(self.scan_line_comment()),
            ('/', Some('*')) => return self.scan_block_comment(),
            ('|', Some('|')) | (':', Some('=')) => {
                self.pos += 2;
                return Ok(self.make_token(TokenKind::Operator));
            }
            _ => {}
        }

        match c {
            '(' | ')' | ',' | ';' | '-' | '+' | '=' | '*' | '<' | '>' | '/' => {
                self.advance();
                let kind = match c {
                    '(' => TokenKind::OpenParen,
                    ')' => TokenKind::CloseParen,
                    ',' => TokenKind::Comma,
                    ';' => TokenKind::End,
                    _ => TokenKind::Operator,
                };
                Ok(self.make_token(kind))
            }
            '\'' => self.scan_string(),
            c if c.is_ascii_digit() => {
                self.advance();
                self.advance_while(|c| c.is_ascii_digit() || c == '.');
                Ok(self.make_token(TokenKind::Number))
            }
            c if is_name_start(c) => {
                self.advance();
                self.advance_while(is_name_part);
                Ok(self.make_token(TokenKind::Atom))
            }
            _ => Err(self.fail(format!("unknown token {:?}", self.remaining()))),
        }
    }

    /// Tokenizes up to and including the first End token.
    ///
    /// # Errors
    ///
    /// Returns the first lex error encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_end = token.is_end();
            tokens.push(token);
            if is_end {
                return Ok(tokens);
            }
        }
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '_' | '.' | '"')
}

fn is_name_part(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '"')
}
