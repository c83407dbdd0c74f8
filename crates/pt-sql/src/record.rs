//! Extraction records
//!
//! Every record is an owned value type. Fields that cannot be determined are
//! `None` (serialized as `null`), never an empty string.

use serde::Serialize;
use sqlparser::ast::Statement;

/// Clause in which a predicate or function call was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseContext {
    /// SELECT projection list
    SelectList,
    /// WHERE clause
    Where,
    /// HAVING clause
    Having,
    /// JOIN ... ON condition
    JoinOn,
    /// GROUP BY keys
    GroupBy,
    /// ORDER BY keys
    OrderBy,
    /// QUALIFY clause
    Qualify,
    /// UPDATE ... SET values
    Set,
    /// Rows of a VALUES list
    Values,
}

impl ClauseContext {
    /// Upper-case name as it appears in output rows
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseContext::SelectList => "SELECT_LIST",
            ClauseContext::Where => "WHERE",
            ClauseContext::Having => "HAVING",
            ClauseContext::JoinOn => "JOIN_ON",
            ClauseContext::GroupBy => "GROUP_BY",
            ClauseContext::OrderBy => "ORDER_BY",
            ClauseContext::Qualify => "QUALIFY",
            ClauseContext::Set => "SET",
            ClauseContext::Values => "VALUES",
        }
    }
}

impl std::fmt::Display for ClauseContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position a table reference was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableContext {
    /// Lone relation of a FROM item
    From,
    /// Leftmost relation of a FROM item that has joins
    JoinLeft,
    /// Relation introduced by a JOIN
    JoinRight,
    /// Reference to a CTE defined in the same query
    FromCte,
    /// CTE definition
    Cte,
    /// Alias of a derived table (subquery in FROM)
    Subquery,
    /// Written by INSERT / UPDATE / DELETE / CREATE TABLE AS
    Target,
}

impl TableContext {
    /// Lower-case name as it appears in output rows
    pub fn as_str(&self) -> &'static str {
        match self {
            TableContext::From => "from",
            TableContext::JoinLeft => "join_left",
            TableContext::JoinRight => "join_right",
            TableContext::FromCte => "from_cte",
            TableContext::Cte => "cte",
            TableContext::Subquery => "subquery",
            TableContext::Target => "target",
        }
    }

    /// True for entries that name something defined inside the query itself
    pub fn is_query_local(&self) -> bool {
        matches!(
            self,
            TableContext::FromCte | TableContext::Cte | TableContext::Subquery
        )
    }
}

impl std::fmt::Display for TableContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed statement, re-serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementResult {
    /// Canonical SQL text of the statement
    pub statement: String,
}

impl From<&Statement> for StatementResult {
    fn from(stmt: &Statement) -> Self {
        Self {
            statement: stmt.to_string(),
        }
    }
}

/// A table, CTE or subquery alias referenced by a statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRef {
    /// Qualifier parts joined with `.` (`db.schema` or `schema`)
    pub schema: Option<String>,
    /// Bare table name, CTE name or subquery alias
    pub table: String,
    /// Alias given in the query, if any
    pub alias: Option<String>,
    /// Where the reference was found
    pub context: TableContext,
}

impl TableRef {
    /// Whether the statement writes to this table
    pub fn is_write_target(&self) -> bool {
        self.context == TableContext::Target
    }

    /// `schema.table`, or just `table` when unqualified
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.table),
            None => self.table.clone(),
        }
    }
}

/// A filter conjunct in its raw SQL form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhereConditionResult {
    /// Conjunct SQL text
    pub condition: String,
    /// Table the conjunct applies to, when unambiguous
    pub table_name: Option<String>,
    /// Clause the conjunct was found in
    pub context: ClauseContext,
}

/// A `column <op> literal` filter conjunct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedWhereConditionResult {
    /// Bare column name
    pub column_name: String,
    /// Comparison operator, oriented column-first
    pub operator_type: String,
    /// Literal SQL text
    pub value: String,
    /// Table the column belongs to, when unambiguous
    pub table_name: Option<String>,
    /// Clause the conjunct was found in
    pub context: ClauseContext,
}

/// One function call site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionResult {
    /// Unqualified function name
    pub function_name: String,
    /// Qualifying namespace for schema-qualified calls
    pub schema: Option<String>,
    /// Clause the call was found in
    pub context: ClauseContext,
}

/// Row shape of an extraction record
///
/// `COLUMNS` is the output schema a host binds for the row-producing form;
/// `values` yields one cell per column in the same order.
pub trait Record: Clone + Serialize {
    /// Short name of the record kind
    const KIND: &'static str;

    /// Column names, in output order
    const COLUMNS: &'static [&'static str];

    /// One cell per column, `None` for absent values
    fn values(&self) -> Vec<Option<String>>;
}

impl Record for StatementResult {
    const KIND: &'static str = "statements";
    const COLUMNS: &'static [&'static str] = &["statement"];

    fn values(&self) -> Vec<Option<String>> {
        vec![Some(self.statement.clone())]
    }
}

impl Record for TableRef {
    const KIND: &'static str = "tables";
    const COLUMNS: &'static [&'static str] = &["schema", "table", "alias", "context"];

    fn values(&self) -> Vec<Option<String>> {
        vec![
            self.schema.clone(),
            Some(self.table.clone()),
            self.alias.clone(),
            Some(self.context.to_string()),
        ]
    }
}

impl Record for WhereConditionResult {
    const KIND: &'static str = "where";
    const COLUMNS: &'static [&'static str] = &["condition", "table_name", "context"];

    fn values(&self) -> Vec<Option<String>> {
        vec![
            Some(self.condition.clone()),
            self.table_name.clone(),
            Some(self.context.to_string()),
        ]
    }
}

impl Record for DetailedWhereConditionResult {
    const KIND: &'static str = "where_detailed";
    const COLUMNS: &'static [&'static str] = &[
        "column_name",
        "operator_type",
        "value",
        "table_name",
        "context",
    ];

    fn values(&self) -> Vec<Option<String>> {
        vec![
            Some(self.column_name.clone()),
            Some(self.operator_type.clone()),
            Some(self.value.clone()),
            self.table_name.clone(),
            Some(self.context.to_string()),
        ]
    }
}

impl Record for FunctionResult {
    const KIND: &'static str = "functions";
    const COLUMNS: &'static [&'static str] = &["function_name", "schema", "context"];

    fn values(&self) -> Vec<Option<String>> {
        vec![
            Some(self.function_name.clone()),
            self.schema.clone(),
            Some(self.context.to_string()),
        ]
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
