//! Parenthesis-aware expression tree building.

use crate::ast::Expression;
use crate::lexer::{Lexer, Span, Token, TokenKind};

use super::ParseError;

/// Significant tokens of one statement.
///
/// Comments are skipped. Iteration stops at the first End token or at the
/// first lex error, which is kept for the parser to report.
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    end: Option<Token>,
    error: Option<ParseError>,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream over `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            end: None,
            error: None,
        }
    }

    /// Takes the lex error that stopped the stream, if any.
    pub fn take_error(&mut self) -> Option<ParseError> {
        self.error.take()
    }

    /// Returns true if a lex error stopped the stream.
    #[must_use]
    pub const fn failed(&self) -> bool {
        self.error.is_some()
    }

    /// Returns the source offset where the statement ended.
    #[must_use]
    pub fn end_offset(&self) -> usize {
        self.end
            .as_ref()
            .map_or(self.lexer.source().len(), |t| t.span.start)
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.end.is_some() || self.error.is_some() {
            return None;
        }
        loop {
            match self.lexer.next_token() {
                Ok(token) if token.is_trivia() => {}
                Ok(token) if token.is_end() => {
                    self.end = Some(token);
                    return None;
                }
                Ok(token) => return Some(token),
                Err(error) => {
                    self.error = Some(error);
                    return None;
                }
            }
        }
    }
}

/// Builds the group opened by `open`, consuming `tokens` up to the matching
/// `)`.
///
/// Nested parentheses become nested groups; every other token, commas
/// included, becomes a leaf. If the tokens run out first, the group collected
/// so far is returned with `closed: false`.
pub fn build_group<I>(open: &Token, tokens: &mut I, source: &str) -> Expression
where
    I: Iterator<Item = Token>,
{
    let mut children = Vec::new();
    let mut last = open.span.clone();

    while let Some(token) = tokens.next() {
        match token.kind {
            TokenKind::OpenParen => {
                let group = build_group(&token, tokens, source);
                last = group.span().clone();
                children.push(group);
            }
            TokenKind::CloseParen => {
                return Expression::Group {
                    children,
                    span: open.span.merge(&token.span, source),
                    closed: true,
                };
            }
            _ => {
                last = token.span.clone();
                children.push(Expression::Leaf(token));
            }
        }
    }

    Expression::Group {
        children,
        span: open.span.merge(&last, source),
        closed: false,
    }
}

/// Builds a top-level run: every `(` opens a group, everything else is a
/// leaf. A `)` without a matching `(` stays a leaf.
pub fn build_sequence<I>(tokens: &mut I, source: &str) -> Vec<Expression>
where
    I: Iterator<Item = Token>,
{
    let mut items = Vec::new();
    while let Some(token) = tokens.next() {
        if token.kind == TokenKind::OpenParen {
            items.push(build_group(&token, tokens, source));
        } else {
            items.push(Expression::Leaf(token));
        }
    }
    items
}

/// Splits `items` at comma leaves. Commas inside groups do not split.
#[must_use]
pub fn split_commas(items: &[Expression]) -> Vec<&[Expression]> {
    if items.is_empty() {
        return Vec::new();
    }
    items
        .split(|item| item.is_kind(TokenKind::Comma))
        .collect()
}

/// Returns the span from the first to the last item.
#[must_use]
pub fn span_of(items: &[Expression], source: &str) -> Option<Span> {
    let first = items.first()?;
    let last = items.last()?;
    Some(first.span().merge(last.span(), source))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(source: &str) -> Expression {
        let mut tokens = TokenStream::new(source);
        let Some(open) = tokens.next() else {
            panic!("no tokens in {source:?}");
        };
        assert_eq!(open.kind, TokenKind::OpenParen);
        build_group(&open, &mut tokens, source)
    }

    fn values(items: &[Expression]) -> Vec<Option<&str>> {
        items.iter().map(Expression::value).collect()
    }

    #[test]
    fn test_flat_group() {
        let tree = group("(1, 'x')");
        assert_eq!(values(tree.children()), vec![Some("1"), Some(","), Some("x")]);
        assert_eq!(tree.span().text, "(1, 'x')");
        assert!(matches!(tree, Expression::Group { closed: true, .. }));
    }

    #[test]
    fn test_nested_group() {
        let tree = group("(a, f(b, (c)), d) tail");
        let children = tree.children();
        assert_eq!(children.len(), 6);
        assert_eq!(children[3].span().text, "(b, (c))");
        assert_eq!(children[3].children()[2].span().text, "(c)");
        assert_eq!(children[5].value(), Some("D"));
        assert_eq!(tree.span().text, "(a, f(b, (c)), d)");
    }

    #[test]
    fn test_unbalanced_group() {
        let tree = group("(a, (b");
        assert!(matches!(tree, Expression::Group { closed: false, .. }));
        assert_eq!(tree.span().text, "(a, (b");
        assert_eq!(tree.children().len(), 3);
        assert!(matches!(
            tree.children()[2],
            Expression::Group { closed: false, .. }
        ));
    }

    #[test]
    fn test_empty_group() {
        let tree = group("()");
        assert!(tree.children().is_empty());
        assert_eq!(tree.span().text, "()");
    }

    #[test]
    fn test_split_commas() {
        let source = "a, f(b, c), d + 1";
        let items = build_sequence(&mut TokenStream::new(source), source);
        let parts = split_commas(&items);
        let texts: Vec<String> = parts
            .iter()
            .filter_map(|p| span_of(p, source))
            .map(|s| s.text)
            .collect();
        assert_eq!(texts, vec!["a", "f(b, c)", "d + 1"]);
        assert!(split_commas(&[]).is_empty());
    }

    #[test]
    fn test_stream_skips_comments_and_stops_at_end() {
        let mut tokens = TokenStream::new("a /* c */ -- d\n b; e");
        let values: Vec<String> = tokens.by_ref().map(|t| t.value).collect();
        assert_eq!(values, vec!["A", "B"]);
        assert_eq!(tokens.end_offset(), 17);
        assert!(!tokens.failed());
        assert!(tokens.next().is_none());
    }

    #[test]
    fn test_stream_keeps_lex_error() {
        let mut tokens = TokenStream::new("a ! b");
        assert_eq!(tokens.next().map(|t| t.value), Some(String::from("A")));
        assert!(tokens.next().is_none());
        assert!(tokens.failed());
        assert!(matches!(
            tokens.take_error(),
            Some(ParseError::Lex { offset: 2, .. })
        ));
    }
}
