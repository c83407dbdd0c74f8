//! Dialect-bound convenience API

use crate::dialect::SqlDialect;
use crate::error::SqlResult;
use crate::extract::{
    extract_count, extract_list, DetailedWhereExtractor, Extractor, FunctionExtractor, RowCursor,
    StatementExtractor, TableExtractor, WhereExtractor,
};
use crate::functions::function_names;
use crate::parser::SqlParser;
use crate::record::{
    DetailedWhereConditionResult, FunctionResult, StatementResult, TableRef,
    WhereConditionResult,
};
use crate::splitter::try_split;
use crate::tables::table_names;

/// Every extraction over one SQL dialect
///
/// All methods take raw SQL text and fail closed: malformed input gives
/// empty results rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserTools {
    parser: SqlParser,
}

impl ParserTools {
    /// Tools for a dialect
    pub fn new(dialect: SqlDialect) -> Self {
        Self {
            parser: SqlParser::new(dialect),
        }
    }

    /// Tools for a dialect given by name (`duckdb`, `snowflake`, ...)
    pub fn from_dialect_name(name: &str) -> SqlResult<Self> {
        SqlParser::from_dialect_name(name).map(|parser| Self { parser })
    }

    /// The bound parser
    pub fn parser(&self) -> &SqlParser {
        &self.parser
    }

    /// Each statement as its own SQL text
    pub fn statements(&self, sql: &str) -> Vec<StatementResult> {
        self.list(&StatementExtractor, sql)
    }

    /// Number of statements that parse
    pub fn num_statements(&self, sql: &str) -> usize {
        self.count(&StatementExtractor, sql)
    }

    /// Every table reference with its position
    pub fn tables(&self, sql: &str) -> Vec<TableRef> {
        self.list(&TableExtractor, sql)
    }

    /// Distinct qualified table names; `exclude_cte` keeps only physical tables
    pub fn table_names(&self, sql: &str, exclude_cte: bool) -> Vec<String> {
        table_names(&self.tables(sql), exclude_cte)
    }

    /// Filter conjuncts with the table each one reads
    pub fn where_conditions(&self, sql: &str) -> Vec<WhereConditionResult> {
        self.list(&WhereExtractor, sql)
    }

    /// Column-versus-literal comparisons among the filter conjuncts
    pub fn where_conditions_detailed(&self, sql: &str) -> Vec<DetailedWhereConditionResult> {
        self.list(&DetailedWhereExtractor, sql)
    }

    /// Function calls in post-order with their clause
    pub fn functions(&self, sql: &str) -> Vec<FunctionResult> {
        self.list(&FunctionExtractor, sql)
    }

    /// Distinct function names in first-seen order
    pub fn function_names(&self, sql: &str) -> Vec<String> {
        function_names(&self.functions(sql))
    }

    /// Whether the SQL parses into at least one statement
    pub fn is_parsable(&self, sql: &str) -> bool {
        try_split(&self.parser, sql).is_ok_and(|list| !list.is_empty())
    }

    /// Row cursor over any extraction
    pub fn rows<E: Extractor>(&self, extractor: E, sql: &str) -> RowCursor<E> {
        RowCursor::new(self.parser, extractor, sql)
    }

    /// All records of an extraction
    pub fn list<E: Extractor>(&self, extractor: &E, sql: &str) -> Vec<E::Record> {
        extract_list(&self.parser, extractor, sql)
    }

    /// Number of records an extraction yields
    pub fn count<E: Extractor>(&self, extractor: &E, sql: &str) -> usize {
        extract_count(&self.parser, extractor, sql)
    }
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tests;
