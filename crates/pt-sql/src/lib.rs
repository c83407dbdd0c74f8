//! pt-sql - structural extraction from SQL text
//!
//! Parses SQL with sqlparser-rs and reports what it contains without running
//! it: the statements, the tables each one reads or writes, its filter
//! predicates and its function calls. Malformed SQL yields empty results,
//! never an error, so callers can feed arbitrary query logs through it.

pub mod blocks;
pub mod dialect;
pub mod error;
pub mod extract;
pub mod functions;
pub mod parser;
pub mod predicates;
pub mod record;
pub mod scope;
pub mod splitter;
pub mod tables;
pub mod tools;
pub mod tree;

pub use dialect::SqlDialect;
pub use error::{SqlError, SqlResult};
pub use extract::{
    extract_count, extract_list, DetailedWhereExtractor, Extractor, FunctionExtractor, RowCursor,
    StatementExtractor, TableExtractor, WhereExtractor,
};
pub use functions::{extract_functions, function_names};
pub use parser::SqlParser;
pub use predicates::{extract_where_conditions, extract_where_conditions_detailed};
pub use record::{
    ClauseContext, DetailedWhereConditionResult, FunctionResult, Record, StatementResult,
    TableContext, TableRef, WhereConditionResult,
};
pub use splitter::{split, split_statements, try_split, StatementList};
pub use tables::{extract_tables, table_names};
pub use tools::ParserTools;
