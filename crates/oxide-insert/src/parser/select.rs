//! SELECT body extraction: projections, aliases and FROM tables.

use crate::ast::{Expression, SelectClause, TableRef};
use crate::lexer::{Span, Token, TokenKind};

use super::tree::{span_of, split_commas};
use super::{Diagnostics, ParseError};

/// Keywords starting a clause after the FROM list.
const CLAUSE_KEYWORDS: &[&str] = &[
    "WHERE", "GROUP", "ORDER", "HAVING", "CONNECT", "START", "UNION", "INTERSECT", "MINUS",
    "EXCEPT", "MODEL", "FETCH", "OFFSET", "LIMIT", "FOR", "WINDOW", "LOG", "RETURNING",
];

/// Keywords that can never start a table reference.
const RESERVED_AFTER_FROM: &[&str] = &[
    "WHERE", "GROUP", "ORDER", "HAVING", "CONNECT", "UNION", "INTERSECT", "MINUS", "EXCEPT",
    "SELECT",
];

/// Keywords combining two queries.
const SET_OPERATORS: &[&str] = &["UNION", "INTERSECT", "MINUS", "EXCEPT"];

/// Keywords of a join operator.
const JOIN_KEYWORDS: &[&str] = &[
    "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "OUTER", "CROSS", "NATURAL",
];

/// Keywords between `SELECT` and the first projection.
const QUANTIFIERS: &[&str] = &["DISTINCT", "UNIQUE", "ALL"];

/// Words that can end a select item but never name its alias.
///
/// Only consulted for implicit aliases: after `AS` any identifier is the
/// alias, `AS year` included.
const NOT_ALIAS: &[&str] = &[
    "AS", "END", "NULL", "TRUE", "FALSE", "YEAR", "MONTH", "DAY", "HOUR", "MINUTE", "SECOND",
];

/// Keywords after which a trailing word is an operand rather than an alias.
const OPERAND_KEYWORDS: &[&str] = &[
    "AND", "OR", "NOT", "IS", "IN", "LIKE", "BETWEEN", "CASE", "WHEN", "THEN", "ELSE", "PRIOR",
    "ESCAPE", "DISTINCT", "UNIQUE", "ALL", "INTERVAL",
];

/// Words after a table that are not its alias.
const TABLE_ALIAS_STOP: &[&str] = &[
    "ON", "USING", "PARTITION", "SAMPLE", "PIVOT", "UNPIVOT", "WITH", "AS",
];

/// Collects the projections and FROM tables of one SELECT body.
///
/// Each part is recorded once: after a set operator the next branch is
/// walked, but the first branch stays authoritative.
pub struct SelectExtractor<'s> {
    source: &'s str,
    clause: SelectClause,
    projections_done: bool,
    from_done: bool,
}

impl<'s> SelectExtractor<'s> {
    /// Creates an extractor for the SELECT starting at `select`.
    #[must_use]
    pub fn new(select: &Token, source: &'s str) -> Self {
        Self {
            source,
            clause: SelectClause {
                span: select.span.clone(),
                ..SelectClause::default()
            },
            projections_done: false,
            from_done: false,
        }
    }

    /// Extracts the clause for `select` followed by the top-level `body`
    /// items (see [`build_sequence`](super::build_sequence)).
    #[must_use]
    pub fn extract(
        select: &Token,
        body: &[Expression],
        source: &'s str,
        diagnostics: &mut Diagnostics,
    ) -> SelectClause {
        let mut extractor = Self::new(select, source);
        extractor.walk(body, diagnostics);
        extractor.finish()
    }

    /// Returns the collected clause.
    #[must_use]
    pub fn finish(self) -> SelectClause {
        self.clause
    }

    /// Walks a body, branch by branch.
    pub fn walk(&mut self, body: &[Expression], diagnostics: &mut Diagnostics) {
        if let Some(last) = body.last() {
            self.clause.span = self.clause.span.merge(last.span(), self.source);
        }

        let mut i = 0;
        loop {
            while body.get(i).is_some_and(|item| item.is_any_keyword(QUANTIFIERS)) {
                i += 1;
            }
            let list_end = body[i..]
                .iter()
                .position(|item| item.is_keyword("FROM") || item.is_any_keyword(SET_OPERATORS))
                .map_or(body.len(), |p| i + p);
            self.record_projections(&body[i..list_end]);
            i = list_end;

            if let Some(from) = body.get(i).filter(|item| item.is_keyword("FROM")) {
                let (tables, used) = self.table_refs(&body[i + 1..]);
                if tables.is_empty() {
                    diagnostics.push(match body.get(i + 1) {
                        Some(item) => ParseError::Syntax {
                            message: String::from("expected a table reference after FROM"),
                            span: item.span().clone(),
                        },
                        None => ParseError::unexpected_end("a table reference", from.span().end()),
                    });
                }
                self.record_from(tables);
                i += 1 + used;
            }

            let Some(p) = body[i..]
                .iter()
                .position(|item| item.is_any_keyword(SET_OPERATORS))
            else {
                break;
            };
            i += p + 1;
            while body.get(i).is_some_and(|item| item.is_any_keyword(QUANTIFIERS)) {
                i += 1;
            }
            if !body.get(i).is_some_and(|item| item.is_keyword("SELECT")) {
                break;
            }
            i += 1;
        }
    }

    /// Records the select items, once.
    fn record_projections(&mut self, items: &[Expression]) {
        if self.projections_done {
            return;
        }
        self.projections_done = true;

        for segment in split_commas(items) {
            let Some(projection) = span_of(segment, self.source) else {
                continue;
            };
            let mut alias = default_alias(&projection, self.source);
            if let Some(explicit) = explicit_alias(segment) {
                alias = explicit.span.clone();
            }
            self.clause.projections.push(projection);
            self.clause.aliases.push(alias);
        }
    }

    /// Records the FROM tables, once.
    fn record_from(&mut self, tables: Vec<TableRef>) {
        if self.from_done {
            return;
        }
        self.from_done = true;
        self.clause.from_tables = tables;
    }

    /// Parses a FROM list, returning the tables and the number of items used.
    fn table_refs(&self, items: &[Expression]) -> (Vec<TableRef>, usize) {
        let mut tables = Vec::new();
        let mut i = 0;

        while let Some((table, used)) = self.table_ref(&items[i..]) {
            tables.push(table);
            i += used;

            if items.get(i).is_some_and(|item| item.is_any_keyword(&["ON", "USING"])) {
                i += 1 + items[i + 1..]
                    .iter()
                    .position(|item| {
                        item.is_kind(TokenKind::Comma)
                            || item.is_any_keyword(JOIN_KEYWORDS)
                            || item.is_any_keyword(CLAUSE_KEYWORDS)
                    })
                    .unwrap_or(items.len() - i - 1);
            }

            match items.get(i) {
                Some(item) if item.is_kind(TokenKind::Comma) => i += 1,
                Some(item) if item.is_any_keyword(JOIN_KEYWORDS) => {
                    while items.get(i).is_some_and(|item| item.is_any_keyword(JOIN_KEYWORDS)) {
                        i += 1;
                    }
                }
                _ => break,
            }
        }

        (tables, i)
    }

    /// Parses one table reference with its optional alias.
    fn table_ref(&self, items: &[Expression]) -> Option<(TableRef, usize)> {
        let first = items.first()?;
        let mut span = first.span().clone();
        let mut used = 1;

        match first {
            Expression::Group { .. } => {}
            Expression::Leaf(token) if is_table_name(token) => loop {
                match items.get(used) {
                    Some(Expression::Leaf(next))
                        if next.kind == TokenKind::Atom
                            && (next.value.starts_with('.') || span.text.ends_with('.')) =>
                    {
                        span = span.merge(&next.span, self.source);
                    }
                    Some(group @ Expression::Group { .. }) => {
                        span = span.merge(group.span(), self.source);
                    }
                    _ => break,
                }
                used += 1;
            },
            Expression::Leaf(_) => return None,
        }

        let mut alias = String::new();
        match items.get(used).and_then(Expression::token) {
            Some(token) if token.is_keyword("AS") => {
                used += 1;
                if let Some(name) = items
                    .get(used)
                    .and_then(Expression::token)
                    .filter(|t| t.kind == TokenKind::Atom)
                {
                    alias.clone_from(&name.span.text);
                    used += 1;
                }
            }
            Some(token) if is_table_alias(token) => {
                alias.clone_from(&token.span.text);
                used += 1;
            }
            _ => {}
        }

        let table = TableRef {
            table: span.text.clone(),
            alias,
            span,
        };
        Some((table, used))
    }
}

/// Clause keywords such as `LIMIT` or `LOG` are valid table names; only
/// words that cannot start a table reference are refused here.
fn is_table_name(token: &Token) -> bool {
    token.kind == TokenKind::Atom
        && !token.is_any_keyword(RESERVED_AFTER_FROM)
        && !token.is_any_keyword(JOIN_KEYWORDS)
}

fn is_table_alias(token: &Token) -> bool {
    is_table_name(token)
        && !token.is_any_keyword(CLAUSE_KEYWORDS)
        && !token.is_any_keyword(TABLE_ALIAS_STOP)
}

/// Finds an explicit `[AS] alias` at the end of a select item.
fn explicit_alias(segment: &[Expression]) -> Option<&Token> {
    let [.., prev, last] = segment else {
        return None;
    };
    let last = last.token().filter(|t| t.kind == TokenKind::Atom)?;
    if prev.is_keyword("AS") {
        return Some(last);
    }
    if last.is_any_keyword(NOT_ALIAS) {
        return None;
    }
    let ends_operand = match prev {
        Expression::Group { .. } => true,
        Expression::Leaf(token) => match token.kind {
            TokenKind::Number | TokenKind::String => true,
            TokenKind::Atom => !token.is_any_keyword(OPERAND_KEYWORDS),
            _ => false,
        },
    };
    ends_operand.then_some(last)
}

/// Infers the alias of a select item from its own text.
///
/// A `CASE` item whose last word follows an `END` is named by that last
/// word; any other item is named by its whole text.
fn default_alias(projection: &Span, source: &str) -> Span {
    let text = projection.text.as_str();
    let is_case = text.get(..4).is_some_and(|head| head.eq_ignore_ascii_case("CASE"))
        && text[4..].starts_with(char::is_whitespace);
    if !is_case {
        return projection.clone();
    }
    let Some((split, space)) = text.char_indices().rev().find(|(_, c)| c.is_whitespace()) else {
        return projection.clone();
    };
    let before = text[..split].trim_end();
    let preceding = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default();
    if !preceding.eq_ignore_ascii_case("END") {
        return projection.clone();
    }
    Span::from_source(
        source,
        projection.start + split + space.len_utf8(),
        projection.stop,
    )
}
