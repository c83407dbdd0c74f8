use super::*;
use crate::record::TableContext;
use std::cell::Cell;

/// Counts how often the full result set is computed
struct CountingExtractor<'a> {
    runs: &'a Cell<usize>,
}

impl Extractor for CountingExtractor<'_> {
    type Record = StatementResult;

    fn extract(&self, stmt: &Statement) -> Vec<StatementResult> {
        StatementExtractor.extract(stmt)
    }

    fn extract_all(&self, statements: &StatementList) -> Vec<StatementResult> {
        self.runs.set(self.runs.get() + 1);
        statements.iter().map(StatementResult::from).collect()
    }
}

#[test]
fn test_cursor_is_lazy_and_memoized() {
    let runs = Cell::new(0);
    let mut cursor = RowCursor::new(
        SqlParser::duckdb(),
        CountingExtractor { runs: &runs },
        "SELECT 1; SELECT 2; SELECT 3",
    );
    assert!(!cursor.is_materialized());
    assert_eq!(runs.get(), 0);

    let rows: Vec<String> = cursor.by_ref().map(|r| r.statement).collect();
    assert_eq!(rows, vec!["SELECT 1", "SELECT 2", "SELECT 3"]);
    assert!(cursor.is_materialized());
    assert_eq!(runs.get(), 1);

    // Fused: exhausted cursors stay exhausted without recomputing
    assert!(cursor.next().is_none());
    assert!(cursor.next().is_none());
    assert_eq!(runs.get(), 1);
}

#[test]
fn test_cursor_size_hint_after_first_pull() {
    let mut cursor = RowCursor::new(
        SqlParser::duckdb(),
        TableExtractor,
        "SELECT * FROM a JOIN b ON a.id = b.id",
    );
    assert_eq!(cursor.size_hint(), (0, None));
    let first = cursor.next().unwrap();
    assert_eq!(first.context, TableContext::JoinLeft);
    assert_eq!(cursor.size_hint(), (1, Some(1)));
    assert_eq!(cursor.columns(), &["schema", "table", "alias", "context"]);
}

#[test]
fn test_cursor_on_malformed_sql_is_empty() {
    let mut cursor = RowCursor::new(SqlParser::duckdb(), WhereExtractor, "SELEC * FRM t WHERE");
    assert!(cursor.next().is_none());
    assert!(cursor.is_materialized());
}

#[test]
fn test_list_and_count_agree() {
    let parser = SqlParser::duckdb();
    let sql = "SELECT upper(a) FROM t WHERE b = 1 AND c > 2; SELECT lower(x), abs(y) FROM u";
    assert_eq!(
        extract_count(&parser, &FunctionExtractor, sql),
        extract_list(&parser, &FunctionExtractor, sql).len()
    );
    assert_eq!(extract_count(&parser, &FunctionExtractor, sql), 3);
    assert_eq!(extract_count(&parser, &WhereExtractor, sql), 2);
    assert_eq!(extract_count(&parser, &DetailedWhereExtractor, sql), 2);
    assert_eq!(extract_count(&parser, &StatementExtractor, sql), 2);
}

#[test]
fn test_results_concatenate_in_statement_order() {
    let parser = SqlParser::duckdb();
    let tables = extract_list(&parser, &TableExtractor, "SELECT * FROM b; SELECT * FROM a");
    let names: Vec<&str> = tables.iter().map(|t| t.table.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn test_malformed_sql_counts_zero() {
    let parser = SqlParser::duckdb();
    for sql in ["", "SELEC 1", "SELECT * FROM"] {
        assert_eq!(extract_count(&parser, &TableExtractor, sql), 0, "sql: {sql}");
        assert!(extract_list(&parser, &StatementExtractor, sql).is_empty());
    }
}
