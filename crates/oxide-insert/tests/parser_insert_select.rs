//! Tests for INSERT ... SELECT statements: target extraction, statement
//! boundaries and tolerated prefixes.

mod common;
use common::*;

#[test]
fn insert_select_with_columns() {
    let i = parse("INSERT INTO tbl (a, b) SELECT x, y AS b2 FROM Tbl2 t2");
    assert_eq!(i.table, "tbl");
    assert_eq!(texts(&i.columns), vec!["a", "b"]);
    assert!(i.literal_values.is_empty());
    assert!(i.values_tree.is_none());

    let Some(select) = i.select else {
        panic!("Expected SELECT");
    };
    assert_eq!(texts(&select.projections), vec!["x", "y AS b2"]);
    assert_eq!(texts(&select.aliases), vec!["x", "b2"]);
    assert_eq!(select.from_tables.len(), 1);
    assert_eq!(select.from_tables[0].table, "Tbl2");
    assert_eq!(select.from_tables[0].alias, "t2");
}

#[test]
fn insert_select_without_columns() {
    let select = parse_select("INSERT INTO archive SELECT * FROM live");
    assert_eq!(texts(&select.projections), vec!["*"]);
    assert_eq!(texts(&select.aliases), vec!["*"]);
    assert_eq!(select.from_tables[0].table, "live");
    assert!(!select.from_tables[0].has_alias());
}

#[test]
fn insert_select_spans() {
    let i = parse("insert into tbl (a) select x from src");
    assert_eq!(i.insert_into_span.text, "insert into tbl (a)");
    let Some(select) = i.select else {
        panic!("Expected SELECT");
    };
    assert_eq!(select.span.text, "select x from src");
    assert_eq!(select.from_tables[0].span.text, "src");
}

#[test]
fn insert_select_inside_block() {
    let i = parse("BEGIN INSERT INTO tbl SELECT * FROM Tbl2; END;");
    assert_eq!(i.table, "tbl");
    let Some(select) = i.select else {
        panic!("Expected SELECT");
    };
    assert_eq!(select.span.text, "SELECT * FROM Tbl2");
    assert_eq!(select.from_tables[0].table, "Tbl2");
}

#[test]
fn insert_select_fragment_starting_at_into() {
    let i = parse("INTO tbl (a) SELECT b FROM t");
    assert_eq!(i.table, "tbl");
    assert_eq!(i.insert_into_span.text, "INTO tbl (a)");
    assert!(i.is_select());
}

#[test]
fn insert_select_with_hint() {
    let i = parse("INSERT /*+ APPEND PARALLEL(4) */ INTO tbl (a) SELECT a FROM src");
    assert_eq!(i.table, "tbl");
    assert_eq!(parse_select("INSERT /*+ APPEND */ INTO t SELECT a FROM s").from_tables[0].table, "s");
}

#[test]
fn insert_select_with_where_and_order() {
    let select = parse_select(
        "INSERT INTO t (a, b) SELECT c, d FROM s WHERE c > 0 AND d IN (1, 2) ORDER BY c",
    );
    assert_eq!(texts(&select.projections), vec!["c", "d"]);
    assert_eq!(select.from_tables.len(), 1);
    assert_eq!(select.from_tables[0].table, "s");
    assert_eq!(
        select.span.text,
        "SELECT c, d FROM s WHERE c > 0 AND d IN (1, 2) ORDER BY c"
    );
}

#[test]
fn insert_select_distinct() {
    let select = parse_select("INSERT INTO t SELECT DISTINCT a, b FROM s");
    assert_eq!(texts(&select.projections), vec!["a", "b"]);
}

#[test]
fn insert_select_union_keeps_first_branch() {
    let select = parse_select("INSERT INTO t SELECT a FROM s1 UNION ALL SELECT b FROM s2");
    assert_eq!(texts(&select.projections), vec!["a"]);
    assert_eq!(select.from_tables.len(), 1);
    assert_eq!(select.from_tables[0].table, "s1");
}

#[test]
fn insert_select_display() {
    let i = parse("INSERT INTO tbl (a) SELECT x FROM Tbl2 t2");
    assert_eq!(
        i.to_string(),
        "tbl [a] FROM=[Tbl2 t2], FIELDS=[x] ALIASES=[x] TEXT=SELECT x FROM Tbl2 t2"
    );
}

#[test]
fn insert_parenthesized_select() {
    let sql = "INSERT INTO t (a) (SELECT x FROM y)";
    let select = parse_select(sql);
    assert_eq!(select.span.text, "SELECT x FROM y");
    assert_eq!(&sql[select.span.start..=select.span.stop], "SELECT x FROM y");
    assert_eq!(select.from_tables[0].table, "y");
}

#[test]
fn insert_parenthesized_select_without_columns() {
    let i = parse("INSERT INTO t (SELECT x, y b FROM z)");
    assert!(i.columns.is_empty());
    let Some(select) = i.select else {
        panic!("Expected SELECT");
    };
    assert_eq!(select.span.text, "SELECT x, y b FROM z");
    assert_eq!(texts(&select.aliases), vec!["x", "b"]);
}

#[test]
fn insert_doubly_parenthesized_select() {
    let select = parse_select("INSERT INTO t (a) ((SELECT x FROM y))");
    assert_eq!(select.span.text, "SELECT x FROM y");
}
