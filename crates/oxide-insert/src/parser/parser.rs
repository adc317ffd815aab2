//! INSERT statement parser.

use tracing::debug;

use super::select::SelectExtractor;
use super::tree::{TokenStream, build_group, build_sequence, span_of, split_commas};
use super::{Diagnostics, ParseError};
use crate::ast::{Expression, InsertStatement};
use crate::lexer::{Span, Token, TokenKind};

/// Keywords of an Oracle multi-table insert (`INSERT ALL`, `INSERT FIRST`).
const MULTI_TABLE: &[&str] = &["ALL", "FIRST"];

/// Parser states, in the order a well-formed statement visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    SeenInsert,
    SeenInto,
    SeenTable,
    InColumnList,
    AwaitingBody,
    InValues,
    Done,
}

/// Extracts the shape of one `INSERT INTO table [(cols)] VALUES|SELECT ...`
/// statement.
///
/// Anything before `INSERT` is skipped, and a fragment that starts directly
/// at `INTO` (the caller already stripped `INSERT`) is accepted as well.
/// The statement ends at the first `;` or at the end of the input.
pub struct Parser<'a> {
    source: &'a str,
    tokens: TokenStream<'a>,
    state: State,
    statement: InsertStatement,
    /// The `INSERT` (or `INTO`) keyword opening the insert clause.
    clause_start: Span,
    /// The `(` after the table name.
    column_open: Span,
    seen_token: bool,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given statement text.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: TokenStream::new(source),
            state: State::Start,
            statement: InsertStatement::default(),
            clause_start: Span::default(),
            column_open: Span::default(),
            seen_token: false,
        }
    }

    /// Parses the statement, appending every problem found to
    /// `diagnostics`.
    ///
    /// Structural errors do not stop the parser; a lex error ends the
    /// statement with whatever was extracted so far.
    pub fn parse(mut self, diagnostics: &mut Diagnostics) -> InsertStatement {
        while self.state != State::Done {
            let Some(token) = self.tokens.next() else {
                break;
            };
            self.step(token, diagnostics);
            self.seen_token = true;
        }

        match self.tokens.take_error() {
            Some(error) => diagnostics.push(error),
            None => self.finish(diagnostics),
        }

        debug!(
            table = %self.statement.table,
            columns = self.statement.columns.len(),
            select = self.statement.is_select(),
            "parsed INSERT statement"
        );
        self.statement
    }

    fn step(&mut self, token: Token, diagnostics: &mut Diagnostics) {
        match self.state {
            State::Start => {
                if token.is_keyword("INSERT") {
                    self.clause_start = token.span;
                    self.state = State::SeenInsert;
                } else if token.is_keyword("INTO") {
                    self.clause_start = token.span;
                    self.state = State::SeenInto;
                } else if !self.seen_token && token.is_any_keyword(MULTI_TABLE) {
                    self.multi_table(diagnostics);
                }
            }
            State::SeenInsert => {
                if token.is_keyword("INTO") {
                    self.state = State::SeenInto;
                } else if token.is_any_keyword(MULTI_TABLE) {
                    self.multi_table(diagnostics);
                } else {
                    diagnostics.push(ParseError::unexpected("INTO", &token));
                }
            }
            State::SeenInto => {
                if token.kind == TokenKind::Atom {
                    self.set_table(&token);
                    self.state = State::SeenTable;
                } else {
                    diagnostics.push(ParseError::unexpected("table name", &token));
                }
            }
            State::SeenTable => match token.kind {
                TokenKind::OpenParen => {
                    self.column_open = token.span.clone();
                    self.state = State::InColumnList;
                }
                TokenKind::Atom if token.is_keyword("VALUES") => self.state = State::InValues,
                TokenKind::Atom if token.is_keyword("SELECT") => self.select(&token, diagnostics),
                _ => {}
            },
            State::InColumnList => match token.kind {
                TokenKind::Atom
                    if token.is_keyword("SELECT") && self.statement.columns.is_empty() =>
                {
                    // `INSERT INTO t (SELECT ...)`: the paren opened the query.
                    let open = Token::new(TokenKind::OpenParen, "(", self.column_open.clone());
                    if let Some(group) = self.query_group(&open, diagnostics) {
                        self.statement.select = Some(SelectExtractor::extract(
                            &token,
                            group.children(),
                            self.source,
                            diagnostics,
                        ));
                    }
                }
                TokenKind::Atom => self.statement.columns.push(token.span),
                TokenKind::Comma => {}
                TokenKind::CloseParen => {
                    self.statement.insert_into_span =
                        self.clause_start.merge(&token.span, self.source);
                    self.state = State::AwaitingBody;
                }
                _ => diagnostics.push(ParseError::unexpected("column name", &token)),
            },
            State::AwaitingBody => {
                if token.is_keyword("VALUES") {
                    self.state = State::InValues;
                } else if token.is_keyword("SELECT") {
                    self.select(&token, diagnostics);
                } else if token.kind == TokenKind::OpenParen {
                    self.parenthesized_select(&token, diagnostics);
                } else {
                    diagnostics.push(ParseError::unexpected("VALUES or SELECT", &token));
                }
            }
            State::InValues => {
                if token.kind == TokenKind::OpenParen {
                    self.values(&token, diagnostics);
                } else {
                    diagnostics.push(ParseError::unexpected("'(' after VALUES", &token));
                }
            }
            State::Done => {}
        }
    }

    fn set_table(&mut self, token: &Token) {
        if self.statement.table.is_empty() {
            self.statement.table.clone_from(&token.span.text);
            self.statement.insert_into_span = self.clause_start.merge(&token.span, self.source);
        }
    }

    fn multi_table(&mut self, diagnostics: &mut Diagnostics) {
        diagnostics.push(ParseError::Warning(String::from(
            "multi-table INSERT is not supported",
        )));
        self.state = State::Done;
    }

    /// Hands the rest of the statement to the select extractor.
    fn select(&mut self, select: &Token, diagnostics: &mut Diagnostics) {
        self.state = State::Done;
        let body = build_sequence(&mut self.tokens, self.source);
        if self.tokens.failed() {
            return;
        }
        self.statement.select = Some(SelectExtractor::extract(
            select,
            &body,
            self.source,
            diagnostics,
        ));
    }

    /// Builds the query group opened by `open`, up to its matching `)`.
    ///
    /// Returns `None` after a lex error.
    fn query_group(&mut self, open: &Token, diagnostics: &mut Diagnostics) -> Option<Expression> {
        self.state = State::Done;
        let group = build_group(open, &mut self.tokens, self.source);
        if self.tokens.failed() {
            return None;
        }
        if matches!(group, Expression::Group { closed: false, .. }) {
            diagnostics.push(ParseError::unexpected_end(
                "')' closing the query",
                self.tokens.end_offset(),
            ));
        }
        Some(group)
    }

    /// Extracts `( SELECT ... )`; the select ends at the matching `)`.
    fn parenthesized_select(&mut self, open: &Token, diagnostics: &mut Diagnostics) {
        let Some(group) = self.query_group(open, diagnostics) else {
            return;
        };
        let mut body = group.children();
        while let [inner @ Expression::Group { .. }] = body {
            body = inner.children();
        }
        match body.split_first() {
            Some((Expression::Leaf(select), rest)) if select.is_keyword("SELECT") => {
                self.statement.select = Some(SelectExtractor::extract(
                    select,
                    rest,
                    self.source,
                    diagnostics,
                ));
            }
            _ => diagnostics.push(ParseError::Syntax {
                message: String::from("expected SELECT inside parentheses"),
                span: group.span().clone(),
            }),
        }
    }

    /// Collects the first VALUES tuple.
    fn values(&mut self, open: &Token, diagnostics: &mut Diagnostics) {
        self.state = State::Done;
        let tuple = build_group(open, &mut self.tokens, self.source);
        if self.tokens.failed() {
            return;
        }
        if matches!(tuple, Expression::Group { closed: false, .. }) {
            diagnostics.push(ParseError::unexpected_end(
                "')' closing VALUES",
                self.tokens.end_offset(),
            ));
        }
        self.statement.literal_values = split_commas(tuple.children())
            .into_iter()
            .filter_map(|item| span_of(item, self.source))
            .collect();
        self.statement.values_tree = Some(tuple);
    }

    /// Reports a statement that ended before its shape was complete.
    fn finish(&self, diagnostics: &mut Diagnostics) {
        let expected = match self.state {
            State::Start => {
                diagnostics.push(ParseError::Warning(String::from(
                    "not an INSERT INTO statement",
                )));
                return;
            }
            State::SeenInsert => "INTO",
            State::SeenInto => "table name",
            State::SeenTable | State::AwaitingBody => "VALUES or SELECT",
            State::InColumnList => "')' closing the column list",
            State::InValues => "'(' after VALUES",
            State::Done => return,
        };
        diagnostics.push(ParseError::unexpected_end(expected, self.tokens.end_offset()));
    }
}

/// Parses one `INSERT INTO ... SELECT|VALUES` statement.
///
/// A leading `INSERT` is optional: fragments starting at `INTO` parse the
/// same way. All spans point into `text` as given.
#[must_use]
pub fn parse_insert_select(text: &str) -> (InsertStatement, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let statement = Parser::new(text).parse(&mut diagnostics);
    (statement, diagnostics)
}
