//! SQL dialect selection

use serde::{Deserialize, Serialize};
use sqlparser::ast::Statement;
use sqlparser::dialect::{
    Dialect, DuckDbDialect, GenericDialect, PostgreSqlDialect, SnowflakeDialect,
};
use sqlparser::parser::Parser;
use std::str::FromStr;

use crate::error::{SqlError, SqlResult};

/// SQL dialect used to parse input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    /// DuckDB SQL dialect
    #[default]
    DuckDb,
    /// Snowflake SQL dialect
    Snowflake,
    /// PostgreSQL dialect
    Postgres,
    /// sqlparser's permissive generic dialect
    Generic,
}

impl SqlDialect {
    /// All supported dialects
    pub const ALL: [SqlDialect; 4] = [
        SqlDialect::DuckDb,
        SqlDialect::Snowflake,
        SqlDialect::Postgres,
        SqlDialect::Generic,
    ];

    /// Get the dialect name
    pub fn name(&self) -> &'static str {
        match self {
            SqlDialect::DuckDb => "duckdb",
            SqlDialect::Snowflake => "snowflake",
            SqlDialect::Postgres => "postgres",
            SqlDialect::Generic => "generic",
        }
    }

    /// Build the underlying sqlparser dialect
    fn parser_dialect(&self) -> Box<dyn Dialect> {
        match self {
            SqlDialect::DuckDb => Box::new(DuckDbDialect {}),
            SqlDialect::Snowflake => Box::new(SnowflakeDialect {}),
            SqlDialect::Postgres => Box::new(PostgreSqlDialect {}),
            SqlDialect::Generic => Box::new(GenericDialect {}),
        }
    }

    /// Parse SQL into AST statements
    pub fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        let dialect = self.parser_dialect();
        Parser::parse_sql(dialect.as_ref(), sql).map_err(|e| {
            let message = e.to_string();
            let (line, column) = parse_location_from_error(&message);
            SqlError::ParseError {
                message,
                line,
                column,
            }
        })
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SqlDialect {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "duckdb" => Ok(SqlDialect::DuckDb),
            "snowflake" => Ok(SqlDialect::Snowflake),
            "postgres" | "postgresql" => Ok(SqlDialect::Postgres),
            "generic" | "ansi" => Ok(SqlDialect::Generic),
            _ => Err(SqlError::UnknownDialect(s.to_string())),
        }
    }
}

/// Parse line and column from a sqlparser error message.
///
/// `ParserError` carries no structured location, so "Line: N, Column: M" is
/// scraped from the message text. Returns `(0, 0)` when absent.
fn parse_location_from_error(msg: &str) -> (usize, usize) {
    let Some(line) = number_after(msg, "Line: ") else {
        return (0, 0);
    };
    let Some(column) = number_after(msg, "Column: ") else {
        return (0, 0);
    };
    (line, column)
}

fn number_after(msg: &str, marker: &str) -> Option<usize> {
    let start = msg.find(marker)? + marker.len();
    let digits: String = msg[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
