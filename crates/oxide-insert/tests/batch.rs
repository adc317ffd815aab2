//! Tests for batch processing: warnings skip, anything else stops.

use oxide_insert::{BatchSummary, ExtractError, InsertStatement, parse_batch, parse_json};

fn collect(statements: &[&str]) -> (Result<BatchSummary, ExtractError>, Vec<String>) {
    let mut tables = Vec::new();
    let result = parse_batch(statements, |_, statement: InsertStatement| {
        tables.push(statement.table);
        Ok(())
    });
    (result, tables)
}

#[test]
fn batch_skips_warnings() {
    let (result, tables) = collect(&[
        "INSERT ALL INTO a VALUES (1) INTO b VALUES (2) SELECT * FROM dual",
        "INSERT INTO t2 (a) VALUES (1)",
        "COMMIT",
    ]);
    assert_eq!(tables, vec!["t2"]);
    assert_eq!(
        result.ok(),
        Some(BatchSummary {
            parsed: 1,
            skipped: 2
        })
    );
}

#[test]
fn batch_stops_at_first_error() {
    let (result, tables) = collect(&[
        "INSERT INTO a (x) VALUES (1)",
        "INSERT INTO b (x, 1) VALUES (1)",
        "INSERT INTO c (x) VALUES (1)",
    ]);
    assert_eq!(tables, vec!["a"]);
    let Err(ExtractError::Statement { text, diagnostics }) = result else {
        panic!("Expected a statement error");
    };
    assert_eq!(text, "INSERT INTO b (x, 1) VALUES (1)");
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn callback_warning_skips_statement() {
    let mut seen = Vec::new();
    let result = parse_batch(
        ["INSERT INTO skip_me VALUES (1)", "INSERT INTO keep VALUES (1)"],
        |_, statement| {
            if statement.table == "skip_me" {
                return Err(ExtractError::Warning(String::from("ignored table")));
            }
            seen.push(statement.table);
            Ok(())
        },
    );
    assert_eq!(seen, vec!["keep"]);
    assert_eq!(result.map(|s| s.skipped).ok(), Some(1));
}

#[test]
fn callback_error_stops_batch() {
    let mut calls = 0;
    let result = parse_batch(
        ["INSERT INTO a VALUES (1)", "INSERT INTO b VALUES (1)"],
        |_, _| {
            calls += 1;
            Err(ExtractError::Other("rewrite failed".into()))
        },
    );
    assert_eq!(calls, 1);
    let Err(error) = result else {
        panic!("Expected the callback error");
    };
    assert_eq!(error.to_string(), "rewrite failed");
}

#[test]
fn callback_receives_statement_text() {
    let mut texts = Vec::new();
    let result = parse_batch(vec![String::from("insert into t values (1)")], |text, _| {
        texts.push(text.to_owned());
        Ok(())
    });
    assert!(result.is_ok());
    assert_eq!(texts, vec!["insert into t values (1)"]);
}

#[test]
fn json_input() {
    let input = r#"[
        "BEGIN INSERT INTO tbl SELECT * FROM Tbl2; END;",
        "INSERT FIRST INTO a VALUES (1) SELECT 1 FROM dual",
        "INSERT INTO tbl (a, b) SELECT x, y AS b2 FROM Tbl2 t2"
    ]"#;
    let mut aliases = Vec::new();
    let summary = parse_json(input.as_bytes(), |_, statement| {
        if let Some(select) = statement.select {
            aliases.extend(select.aliases.into_iter().map(|a| a.text));
        }
        Ok(())
    })
    .unwrap_or_else(|e| panic!("Failed to process batch: {e}"));
    assert_eq!(
        summary,
        BatchSummary {
            parsed: 2,
            skipped: 1
        }
    );
    assert_eq!(aliases, vec!["*", "x", "b2"]);
}

#[test]
fn json_empty_array() {
    let summary = parse_json("[]".as_bytes(), |_, _| Ok(()))
        .unwrap_or_else(|e| panic!("Failed to process batch: {e}"));
    assert_eq!(summary, BatchSummary::default());
}

#[test]
fn json_malformed_input() {
    for input in [r#"{"a": 1}"#, "[1, 2]", r#"["INSERT INTO t VALUES (1)""#, "[] []"] {
        let result = parse_json(input.as_bytes(), |_, _| Ok(()));
        assert!(
            matches!(result, Err(ExtractError::Json(_))),
            "{input}: {result:?}"
        );
    }
}

#[test]
fn json_failure_stops_before_rest_of_input() {
    let input = r#"["INSERT INTO t (1) VALUES (1)", this is not JSON"#;
    let result = parse_json(input.as_bytes(), |_, _| Ok(()));
    assert!(
        matches!(result, Err(ExtractError::Statement { .. })),
        "{result:?}"
    );
}
