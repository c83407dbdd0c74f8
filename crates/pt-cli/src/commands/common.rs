//! Shared rendering for CLI commands

use anyhow::{Context, Result};
use pt_sql::Record;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Cell text for absent values in table output
const NULL_CELL: &str = "NULL";

/// Render records one row at a time
///
/// Table format aligns columns under upper-cased headers; JSON format
/// writes one object per line.
pub(crate) fn render_rows<R, I>(rows: I, format: OutputFormat) -> Result<String>
where
    R: Record,
    I: IntoIterator<Item = R>,
{
    match format {
        OutputFormat::Table => {
            let cells: Vec<Vec<String>> = rows
                .into_iter()
                .map(|r| {
                    r.values()
                        .into_iter()
                        .map(|v| v.unwrap_or_else(|| NULL_CELL.to_string()))
                        .collect()
                })
                .collect();
            let headers: Vec<String> = R::COLUMNS.iter().map(|c| c.to_uppercase()).collect();
            let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
            Ok(format_table(&headers, &cells))
        }
        OutputFormat::Json => {
            let mut out = String::new();
            for row in rows {
                let line = serde_json::to_string(&row)
                    .with_context(|| format!("Failed to serialize {} row", R::KIND))?;
                out.push_str(&line);
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Render all records as one JSON array
pub(crate) fn render_list<T: Serialize>(items: &[T]) -> Result<String> {
    let json = serde_json::to_string_pretty(items).context("Failed to serialize to JSON")?;
    Ok(format!("{}\n", json))
}

/// Render plain names, one per line or as JSON strings
pub(crate) fn render_names(names: &[String], format: OutputFormat) -> Result<String> {
    let mut out = String::new();
    for name in names {
        let line = match format {
            OutputFormat::Table => name.clone(),
            OutputFormat::Json => {
                serde_json::to_string(name).context("Failed to serialize name")?
            }
        };
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Format a table: left-aligned header row, dashed separator, data rows.
/// Columns are separated by two spaces. An empty table prints nothing.
///
/// ```ignore
/// format_table(&["NAME", "KIND"], &[vec!["orders".into(), "from".into()]]);
/// // NAME    KIND
/// // ------  ----
/// // orders  from
/// ```
pub(crate) fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let widths = calculate_column_widths(headers, rows);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(pad_row(headers.iter().copied(), &widths));
    lines.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(pad_row(row.iter().map(String::as_str), &widths));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn pad_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Width of each column: the longest of its header and cells
fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
