//! SQL parser wrapper

use crate::dialect::SqlDialect;
use crate::error::{SqlError, SqlResult};
use sqlparser::ast::Statement;

/// SQL parser that wraps sqlparser-rs with dialect support
///
/// Holds no state beyond the dialect, so one parser can serve any number of
/// independent extraction requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SqlParser {
    dialect: SqlDialect,
}

impl SqlParser {
    /// Create a parser for the given dialect
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    /// Create a new parser with DuckDB dialect
    pub fn duckdb() -> Self {
        Self::new(SqlDialect::DuckDb)
    }

    /// Create a parser from dialect name
    pub fn from_dialect_name(name: &str) -> SqlResult<Self> {
        name.parse().map(Self::new)
    }

    /// Parse SQL into AST statements
    pub fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(SqlError::EmptySql);
        }

        self.dialect.parse(sql)
    }

    /// Parse SQL that must hold exactly one statement
    pub fn parse_single(&self, sql: &str) -> SqlResult<Statement> {
        let mut stmts = self.parse(sql)?;
        match stmts.len() {
            0 => Err(SqlError::EmptySql),
            1 => Ok(stmts.remove(0)),
            n => Err(SqlError::ParseError {
                message: format!("expected a single statement, found {n}"),
                line: 0,
                column: 0,
            }),
        }
    }

    /// Get the dialect
    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Get the dialect name
    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
