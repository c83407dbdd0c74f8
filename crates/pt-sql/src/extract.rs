//! Extraction facade
//!
//! An [`Extractor`] names one kind of extraction. Its results come out in
//! one of three shapes: a lazily evaluated [`RowCursor`], a list
//! ([`extract_list`]) or a count ([`extract_count`]).

use crate::functions::extract_functions;
use crate::parser::SqlParser;
use crate::predicates::{extract_where_conditions, extract_where_conditions_detailed};
use crate::record::{
    DetailedWhereConditionResult, FunctionResult, Record, StatementResult, TableRef,
    WhereConditionResult,
};
use crate::splitter::{split, StatementList};
use crate::tables::extract_tables;
use sqlparser::ast::Statement;
use std::iter::FusedIterator;

/// One kind of structural extraction
pub trait Extractor {
    /// Record produced per finding
    type Record: Record;

    /// Findings of a single statement, in walk order
    fn extract(&self, stmt: &Statement) -> Vec<Self::Record>;

    /// Findings of every statement, concatenated in statement order
    fn extract_all(&self, statements: &StatementList) -> Vec<Self::Record> {
        statements.iter().flat_map(|stmt| self.extract(stmt)).collect()
    }
}

/// Re-serialized statements
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementExtractor;

impl Extractor for StatementExtractor {
    type Record = StatementResult;

    fn extract(&self, stmt: &Statement) -> Vec<StatementResult> {
        vec![StatementResult::from(stmt)]
    }
}

/// Table references
#[derive(Debug, Clone, Copy, Default)]
pub struct TableExtractor;

impl Extractor for TableExtractor {
    type Record = TableRef;

    fn extract(&self, stmt: &Statement) -> Vec<TableRef> {
        extract_tables(stmt)
    }
}

/// Filter conjuncts as SQL text
#[derive(Debug, Clone, Copy, Default)]
pub struct WhereExtractor;

impl Extractor for WhereExtractor {
    type Record = WhereConditionResult;

    fn extract(&self, stmt: &Statement) -> Vec<WhereConditionResult> {
        extract_where_conditions(stmt)
    }
}

/// `column <op> literal` filter conjuncts
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailedWhereExtractor;

impl Extractor for DetailedWhereExtractor {
    type Record = DetailedWhereConditionResult;

    fn extract(&self, stmt: &Statement) -> Vec<DetailedWhereConditionResult> {
        extract_where_conditions_detailed(stmt)
    }
}

/// Function call sites
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionExtractor;

impl Extractor for FunctionExtractor {
    type Record = FunctionResult;

    fn extract(&self, stmt: &Statement) -> Vec<FunctionResult> {
        extract_functions(stmt)
    }
}

/// All findings of an extraction over a SQL string
///
/// Malformed SQL yields an empty list.
pub fn extract_list<E: Extractor>(parser: &SqlParser, extractor: &E, sql: &str) -> Vec<E::Record> {
    extractor.extract_all(&split(parser, sql))
}

/// Number of findings; always `extract_list(..).len()`
pub fn extract_count<E: Extractor>(parser: &SqlParser, extractor: &E, sql: &str) -> usize {
    extract_list(parser, extractor, sql).len()
}

/// Row-at-a-time view of one extraction request
///
/// The cursor owns its SQL text. Nothing is parsed until the first pull,
/// which computes and memoizes the whole result set; later pulls are served
/// from the memo. Once exhausted it keeps returning `None`.
#[derive(Debug)]
pub struct RowCursor<E: Extractor> {
    parser: SqlParser,
    extractor: E,
    sql: String,
    results: Option<Vec<E::Record>>,
    row: usize,
}

impl<E: Extractor> RowCursor<E> {
    pub fn new(parser: SqlParser, extractor: E, sql: impl Into<String>) -> Self {
        Self {
            parser,
            extractor,
            sql: sql.into(),
            results: None,
            row: 0,
        }
    }

    /// Output column names of the record type
    pub fn columns(&self) -> &'static [&'static str] {
        E::Record::COLUMNS
    }

    /// Whether the result set has been computed
    pub fn is_materialized(&self) -> bool {
        self.results.is_some()
    }

    fn materialize(&mut self) -> &[E::Record] {
        if self.results.is_none() {
            let statements = split(&self.parser, &self.sql);
            let results = self.extractor.extract_all(&statements);
            log::debug!(
                "Materialized {} {} row(s) from {} statement(s)",
                results.len(),
                E::Record::KIND,
                statements.len()
            );
            self.results = Some(results);
        }
        self.results.as_deref().unwrap_or_default()
    }
}

impl<E: Extractor> Iterator for RowCursor<E> {
    type Item = E::Record;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.row;
        let record = self.materialize().get(row).cloned()?;
        self.row += 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.results {
            Some(results) => {
                let remaining = results.len().saturating_sub(self.row);
                (remaining, Some(remaining))
            }
            None => (0, None),
        }
    }
}

impl<E: Extractor> FusedIterator for RowCursor<E> {}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
