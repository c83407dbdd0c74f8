//! Statement splitting
//!
//! The splitter is the only place parse failures are handled. Malformed or
//! empty input becomes an empty [`StatementList`], so every extractor fed
//! from here reports "no findings" instead of an error.

use crate::error::SqlResult;
use crate::parser::SqlParser;
use crate::record::StatementResult;
use sqlparser::ast::Statement;

/// Statement trees parsed from one SQL input, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementList {
    statements: Vec<Statement>,
}

impl StatementList {
    /// A list with no statements
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Whether the list holds no statements
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Iterate the statement trees
    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Re-serialize every statement
    pub fn results(&self) -> Vec<StatementResult> {
        self.statements.iter().map(StatementResult::from).collect()
    }
}

impl From<Vec<Statement>> for StatementList {
    fn from(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

impl<'a> IntoIterator for &'a StatementList {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Split SQL into statements, surfacing parse errors
pub fn try_split(parser: &SqlParser, sql: &str) -> SqlResult<StatementList> {
    parser.parse(sql).map(StatementList::from)
}

/// Split SQL into statements, failing closed
///
/// Any parse error yields an empty list.
pub fn split(parser: &SqlParser, sql: &str) -> StatementList {
    match try_split(parser, sql) {
        Ok(list) => list,
        Err(e) => {
            log::debug!("Treating unparsable SQL as empty ({}): {}", parser.dialect_name(), e);
            StatementList::empty()
        }
    }
}

/// Split SQL and re-serialize each statement
pub fn split_statements(parser: &SqlParser, sql: &str) -> Vec<StatementResult> {
    split(parser, sql).results()
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
