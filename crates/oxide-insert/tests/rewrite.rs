//! Tests for text-preserving rewrites driven by extracted spans.

use std::collections::HashMap;

use oxide_insert::parse_insert_select;
use oxide_insert::rewrite::{RewriteError, Rewriter, rename_columns};

fn renames(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(from, to)| ((*from).to_owned(), (*to).to_owned()))
        .collect()
}

#[test]
fn rename_keeps_formatting() {
    let sql = "INSERT INTO tbl (a,\n    b)  -- keep me\nSELECT x, y AS b2 FROM Tbl2 t2";
    let (insert, _) = parse_insert_select(sql);
    let out = rename_columns(sql, &insert, &renames(&[("a", "alpha"), ("B", "beta")]))
        .unwrap_or_else(|e| panic!("Failed to rewrite: {e}"));
    assert_eq!(
        out,
        "INSERT INTO tbl (alpha,\n    beta)  -- keep me\nSELECT x, y AS b2 FROM Tbl2 t2"
    );
}

#[test]
fn rename_unknown_column_is_noop() {
    let sql = "insert into t (a) values (1)";
    let (insert, _) = parse_insert_select(sql);
    assert_eq!(
        rename_columns(sql, &insert, &renames(&[("z", "y")])).as_deref(),
        Ok(sql)
    );
}

#[test]
fn rewrite_select_aliases() {
    let sql = "INSERT INTO t (a, b) SELECT x, y AS b2 FROM src s";
    let (insert, _) = parse_insert_select(sql);
    let Some(select) = insert.select else {
        panic!("Expected SELECT");
    };
    let mut rewriter = Rewriter::new(sql);
    rewriter.replace(&select.aliases[1], "renamed");
    rewriter.replace(&select.from_tables[0].span, "other_src");
    assert_eq!(
        rewriter.finish().as_deref(),
        Ok("INSERT INTO t (a, b) SELECT x, y AS renamed FROM other_src s")
    );
}

#[test]
fn rewrite_with_foreign_spans_fails() {
    let (insert, _) = parse_insert_select("INSERT INTO some_long_table (col) VALUES (1)");
    let result = rename_columns("short", &insert, &renames(&[("col", "c")]));
    assert!(matches!(result, Err(RewriteError::OutOfBounds { .. })));
}
