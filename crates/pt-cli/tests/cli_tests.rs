//! Integration tests for the ptools binary

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Path to the compiled ptools binary
fn ptools_bin() -> String {
    env!("CARGO_BIN_EXE_ptools").to_string()
}

/// Run `ptools` in `dir` and return (stdout, stderr, success).
fn run_ptools_in(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(ptools_bin())
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute ptools with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

/// Run `ptools` in an empty directory so no ptools.yml is picked up
fn run_ptools(args: &[&str]) -> (String, String, bool) {
    let dir = TempDir::new().unwrap();
    run_ptools_in(dir.path(), args)
}

#[test]
fn test_statements_count() {
    let (stdout, _, ok) = run_ptools(&["statements", "SELECT 1; SELECT 2;", "-m", "count"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "2");
}

#[test]
fn test_tables_rows_table_output() {
    let (stdout, _, ok) = run_ptools(&[
        "tables",
        "SELECT * FROM raw.orders o JOIN users u ON o.uid = u.id",
    ]);
    assert!(ok);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("SCHEMA"));
    assert!(lines[2].contains("orders") && lines[2].ends_with("join_left"));
    assert!(lines[3].contains("NULL") && lines[3].ends_with("join_right"));
}

#[test]
fn test_tables_names_exclude_cte() {
    let (stdout, _, ok) = run_ptools(&[
        "tables",
        "WITH c AS (SELECT * FROM a) SELECT * FROM c JOIN b ON c.id = b.id",
        "--names",
        "--exclude-cte",
    ]);
    assert!(ok);
    assert_eq!(stdout, "a\nb\n");
}

#[test]
fn test_where_list_json() {
    let (stdout, _, ok) = run_ptools(&[
        "where",
        "SELECT * FROM t WHERE a = 1 AND b > 2",
        "-m",
        "list",
    ]);
    assert!(ok);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed[0]["condition"], "a = 1");
    assert_eq!(parsed[1]["table_name"], "t");
}

#[test]
fn test_where_detailed_json_rows() {
    let (stdout, _, ok) = run_ptools(&[
        "where-detailed",
        "SELECT * FROM t WHERE 5 < a",
        "-o",
        "json",
    ]);
    assert!(ok);
    let row: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(row["column_name"], "a");
    assert_eq!(row["operator_type"], ">");
    assert_eq!(row["value"], "5");
}

#[test]
fn test_functions_names() {
    let (stdout, _, ok) = run_ptools(&[
        "functions",
        "SELECT upper(lower(x)), upper(y) FROM t",
        "--names",
    ]);
    assert!(ok);
    assert_eq!(stdout, "lower\nupper\n");
}

#[test]
fn test_malformed_sql_is_not_an_error() {
    let (stdout, _, ok) = run_ptools(&["tables", "SELEC * FRM;", "-m", "count"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "0");

    let (stdout, _, ok) = run_ptools(&["where", "SELEC * FRM;"]);
    assert!(ok);
    assert!(stdout.is_empty());
}

#[test]
fn test_check_command() {
    let (stdout, _, ok) = run_ptools(&["check", "SELECT 1"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "true");

    let (stdout, _, ok) = run_ptools(&["check", "SELEC 1"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "false");
}

#[test]
fn test_sql_from_file_and_stdin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("query.sql");
    std::fs::write(&path, "SELECT * FROM a; SELECT * FROM b").unwrap();
    let (stdout, _, ok) = run_ptools_in(dir.path(), &["tables", "-f", "query.sql", "--names"]);
    assert!(ok);
    assert_eq!(stdout, "a\nb\n");

    let mut child = Command::new(ptools_bin())
        .current_dir(dir.path())
        .args(["statements", "-m", "count"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"SELECT 1; SELECT 2; SELECT 3")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "3");
}

#[test]
fn test_missing_file_is_an_error() {
    let (_, stderr, ok) = run_ptools(&["tables", "-f", "does_not_exist.sql"]);
    assert!(!ok);
    assert!(stderr.contains("Failed to read SQL file"));
}

#[test]
fn test_config_file_sets_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("ptools.yml"), "mode: count\n").unwrap();
    let (stdout, _, ok) = run_ptools_in(dir.path(), &["functions", "SELECT sum(a) FROM t"]);
    assert!(ok);
    assert_eq!(stdout.trim(), "1");

    // Flags override config
    let (stdout, _, ok) = run_ptools_in(
        dir.path(),
        &["functions", "SELECT sum(a) FROM t", "-m", "rows", "-o", "json"],
    );
    assert!(ok);
    assert!(stdout.contains("\"function_name\":\"sum\""));
}

#[test]
fn test_bad_config_and_dialect_are_errors() {
    let (_, stderr, ok) = run_ptools(&["-c", "missing.yml", "tables", "SELECT 1"]);
    assert!(!ok);
    assert!(stderr.contains("Failed to load configuration file"));

    let (_, stderr, ok) = run_ptools(&["-d", "oracle", "tables", "SELECT 1"]);
    assert!(!ok);
    assert!(stderr.contains("Invalid SQL dialect"));
}

#[test]
fn test_verbose_goes_to_stderr() {
    let (stdout, stderr, ok) = run_ptools(&[
        "-v",
        "-d",
        "snowflake",
        "statements",
        "SELECT 1",
        "-m",
        "count",
    ]);
    assert!(ok);
    assert_eq!(stdout.trim(), "1");
    assert!(stderr.contains("[verbose] Using snowflake dialect"));
}
