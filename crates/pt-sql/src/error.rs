//! Error types for pt-sql

use thiserror::Error;

/// SQL parsing errors
///
/// Only the parser wrapper produces these. The statement splitter collapses
/// them into an empty statement list, so extractors never see one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlError {
    /// SQL parse error (S001)
    #[error("[S001] SQL parse error at line {line}, column {column}: {message}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    /// Empty SQL (S002)
    #[error("[S002] SQL is empty")]
    EmptySql,

    /// Unknown dialect name (S003)
    #[error("[S003] Unknown SQL dialect: {0} (expected duckdb, snowflake, postgres or generic)")]
    UnknownDialect(String),
}

impl SqlError {
    /// True for the errors the splitter treats as "no statements"
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, SqlError::ParseError { .. } | SqlError::EmptySql)
    }
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
