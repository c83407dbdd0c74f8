use super::*;
use crate::error::SqlError;

#[test]
fn test_split_two_statements_in_order() {
    let parser = SqlParser::duckdb();
    let results = split_statements(&parser, "SELECT 1; SELECT 2;");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].statement, "SELECT 1");
    assert_eq!(results[1].statement, "SELECT 2");
}

#[test]
fn test_split_normalizes_whitespace_and_keywords() {
    let parser = SqlParser::duckdb();
    let results = split_statements(&parser, "select   *\n  from users\twhere id=1");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].statement, "SELECT * FROM users WHERE id = 1");
}

#[test]
fn test_each_statement_reparses_alone() {
    let parser = SqlParser::duckdb();
    let sql = r#"
        WITH recent AS (SELECT * FROM orders WHERE created_at > '2024-01-01')
        SELECT customer_id, count(*) FROM recent GROUP BY customer_id;
        INSERT INTO archive SELECT * FROM orders;
        UPDATE orders SET status = 'done' WHERE id = 7;
        DELETE FROM orders WHERE id = 8
    "#;
    let results = split_statements(&parser, sql);
    assert_eq!(results.len(), 4);
    for result in &results {
        let reparsed = parser.parse(&result.statement).unwrap();
        assert_eq!(reparsed.len(), 1, "statement: {}", result.statement);
    }
}

#[test]
fn test_malformed_sql_yields_empty_list() {
    let parser = SqlParser::duckdb();
    assert!(split(&parser, "SELEC * FRM;").is_empty());
    assert!(split_statements(&parser, "SELECT 1; SELEC 2").is_empty());
}

#[test]
fn test_empty_sql_yields_empty_list() {
    let parser = SqlParser::duckdb();
    assert!(split(&parser, "").is_empty());
    assert!(split(&parser, "  ").is_empty());
}

#[test]
fn test_try_split_surfaces_error() {
    let parser = SqlParser::duckdb();
    let err = try_split(&parser, "SELEC * FRM;").unwrap_err();
    assert!(matches!(err, SqlError::ParseError { .. }));

    let list = try_split(&parser, "SELECT 1").unwrap();
    assert_eq!(list.len(), 1);
}

#[test]
fn test_statement_list_iteration() {
    let parser = SqlParser::duckdb();
    let list = split(&parser, "SELECT 1; SELECT 2; SELECT 3");
    assert_eq!(list.iter().count(), 3);
    assert_eq!((&list).into_iter().count(), 3);
    assert_eq!(StatementList::empty().len(), 0);
}
