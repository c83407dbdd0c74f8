use super::*;
use pt_sql::{ClauseContext, TableContext, TableRef, WhereConditionResult};

fn orders_ref() -> TableRef {
    TableRef {
        schema: Some("raw".to_string()),
        table: "orders".to_string(),
        alias: None,
        context: TableContext::From,
    }
}

#[test]
fn test_format_table_alignment() {
    let out = format_table(
        &["NAME", "KIND"],
        &[
            vec!["orders".to_string(), "from".to_string()],
            vec!["c".to_string(), "cte".to_string()],
        ],
    );
    assert_eq!(out, "NAME    KIND\n------  ----\norders  from\nc       cte\n");
}

#[test]
fn test_format_table_empty() {
    assert_eq!(format_table(&["NAME"], &[]), "");
}

#[test]
fn test_render_rows_table_shows_null() {
    let out = render_rows(vec![orders_ref()], OutputFormat::Table).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("SCHEMA"));
    assert!(lines[2].contains("NULL"));
    assert!(lines[2].ends_with("from"));
}

#[test]
fn test_render_rows_json_lines() {
    let out = render_rows(
        vec![
            WhereConditionResult {
                condition: "a = 1".to_string(),
                table_name: None,
                context: ClauseContext::Where,
            };
            2
        ],
        OutputFormat::Json,
    )
    .unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        r#"{"condition":"a = 1","table_name":null,"context":"WHERE"}"#
    );
}

#[test]
fn test_render_list_is_one_array() {
    let out = render_list(&[orders_ref(), orders_ref()]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    assert_eq!(parsed[0]["schema"], "raw");

    let empty = render_list::<TableRef>(&[]).unwrap();
    assert_eq!(empty.trim(), "[]");
}

#[test]
fn test_render_names() {
    let names = vec!["raw.a".to_string(), "b".to_string()];
    assert_eq!(render_names(&names, OutputFormat::Table).unwrap(), "raw.a\nb\n");
    assert_eq!(
        render_names(&names, OutputFormat::Json).unwrap(),
        "\"raw.a\"\n\"b\"\n"
    );
}
