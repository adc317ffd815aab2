#![allow(dead_code)]

use oxide_insert::{Diagnostics, InsertStatement, SelectClause, Span, parse_insert_select};

pub fn parse(sql: &str) -> InsertStatement {
    let (statement, diagnostics) = parse_insert_select(sql);
    assert!(
        diagnostics.is_empty(),
        "Failed to parse: {sql}\nDiagnostics:\n{diagnostics}"
    );
    statement
}

pub fn parse_err(sql: &str) -> (InsertStatement, Diagnostics) {
    let (statement, diagnostics) = parse_insert_select(sql);
    assert!(!diagnostics.is_empty(), "Expected diagnostics for: {sql}");
    (statement, diagnostics)
}

pub fn parse_select(sql: &str) -> SelectClause {
    match parse(sql).select {
        Some(select) => select,
        None => panic!("Expected SELECT in: {sql}"),
    }
}

pub fn texts(spans: &[Span]) -> Vec<&str> {
    spans.iter().map(|span| span.text.as_str()).collect()
}

/// Asserts that a span's text is the exact slice of `source` it points to.
pub fn assert_slice(source: &str, span: &Span) {
    assert_eq!(
        source.get(span.start..=span.stop),
        Some(span.text.as_str()),
        "span {span:?} does not match {source:?}"
    );
}
