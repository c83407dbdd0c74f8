//! Table reference extraction
//!
//! Reports every table a statement reads or writes, one [`TableRef`] per
//! occurrence, tagged with the position it was found in.

use crate::blocks::{select_block, statement_keyword};
use crate::record::{TableContext, TableRef};
use crate::tree::{classify_table, split_qualified, walk_expr, Reached, TableNode};
use sqlparser::ast::{
    Expr, FromTable, Ident, ObjectName, OrderByKind, Query, Select, SetExpr, Statement,
    TableFactor, TableObject, TableWithJoins, UpdateTableFromKind,
};
use std::collections::HashSet;

/// Extract all table references from a statement, in walk order
///
/// Duplicates are kept: a table read twice yields two entries.
pub fn extract_tables(stmt: &Statement) -> Vec<TableRef> {
    let mut collector = TableCollector::default();
    collector.statement(stmt);
    collector.refs
}

/// Distinct qualified names in first-seen order
///
/// With `exclude_cte` set, CTE definitions, CTE references and subquery
/// aliases are dropped so only physical tables remain.
pub fn table_names(records: &[TableRef], exclude_cte: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| !(exclude_cte && r.context.is_query_local()))
        .map(TableRef::qualified_name)
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[derive(Debug, Default)]
struct TableCollector {
    refs: Vec<TableRef>,
    /// CTE names of each enclosing WITH, innermost last
    ctes: Vec<Vec<String>>,
}

impl TableCollector {
    fn statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Query(query) => self.query(query),
            Statement::Insert(insert) => {
                if let TableObject::TableName(name) = &insert.table {
                    self.push_object(name, None, TableContext::Target);
                }
                if let Some(source) = &insert.source {
                    self.query(source);
                }
            }
            Statement::Update(update) => {
                self.target(&update.table);
                if let Some(
                    UpdateTableFromKind::BeforeSet(tables) | UpdateTableFromKind::AfterSet(tables),
                ) = &update.from
                {
                    for twj in tables {
                        self.table_with_joins(twj);
                    }
                }
                for assignment in &update.assignments {
                    self.expr_subqueries(&assignment.value);
                }
                if let Some(selection) = &update.selection {
                    self.expr_subqueries(selection);
                }
            }
            Statement::Delete(delete) => {
                let from = match &delete.from {
                    FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => {
                        tables
                    }
                };
                if delete.tables.is_empty() {
                    for twj in from {
                        self.target(twj);
                    }
                } else {
                    // Multi-table form: DELETE t1 FROM t1 JOIN t2 ...
                    for name in &delete.tables {
                        self.push_object(name, None, TableContext::Target);
                    }
                    for twj in from {
                        self.table_with_joins(twj);
                    }
                }
                if let Some(using) = &delete.using {
                    for twj in using {
                        self.table_with_joins(twj);
                    }
                }
                if let Some(selection) = &delete.selection {
                    self.expr_subqueries(selection);
                }
            }
            Statement::CreateTable(create) => {
                if let Some(query) = &create.query {
                    self.push_object(&create.name, None, TableContext::Target);
                    self.query(query);
                }
            }
            other => log::debug!("No table references in statement: {}", statement_keyword(other)),
        }
    }

    fn query(&mut self, query: &Query) {
        let scoped = match &query.with {
            Some(with) => {
                self.ctes.push(
                    with.cte_tables
                        .iter()
                        .map(|cte| cte.alias.name.value.clone())
                        .collect(),
                );
                for cte in &with.cte_tables {
                    self.refs.push(TableRef {
                        schema: None,
                        table: cte.alias.name.value.clone(),
                        alias: None,
                        context: TableContext::Cte,
                    });
                    self.query(&cte.query);
                }
                true
            }
            None => false,
        };

        self.set_expr(&query.body);
        if let Some(OrderByKind::Expressions(exprs)) = query.order_by.as_ref().map(|o| &o.kind) {
            for order in exprs {
                self.expr_subqueries(&order.expr);
            }
        }

        if scoped {
            self.ctes.pop();
        }
    }

    fn set_expr(&mut self, body: &SetExpr) {
        match body {
            SetExpr::Select(select) => self.select(select),
            SetExpr::Query(query) => self.query(query),
            SetExpr::SetOperation { left, right, .. } => {
                self.set_expr(left);
                self.set_expr(right);
            }
            SetExpr::Values(values) => {
                for expr in values.rows.iter().flatten() {
                    self.expr_subqueries(expr);
                }
            }
            SetExpr::Insert(stmt) | SetExpr::Update(stmt) | SetExpr::Delete(stmt) => {
                self.statement(stmt)
            }
            _ => {}
        }
    }

    fn select(&mut self, select: &Select) {
        for twj in &select.from {
            self.table_with_joins(twj);
        }
        for (_, expr) in select_block(select, &[]).clauses() {
            self.expr_subqueries(expr);
        }
    }

    fn table_with_joins(&mut self, twj: &TableWithJoins) {
        if twj.joins.is_empty() {
            self.relation(&twj.relation, TableContext::From);
            return;
        }
        self.relation(&twj.relation, TableContext::JoinLeft);
        for join in &twj.joins {
            self.relation(&join.relation, TableContext::JoinRight);
        }
    }

    fn relation(&mut self, factor: &TableFactor, position: TableContext) {
        match classify_table(factor) {
            TableNode::Base { name, alias } => {
                let context = if self.is_cte(name) {
                    TableContext::FromCte
                } else {
                    position
                };
                self.push_object(name, alias, context);
            }
            TableNode::Derived { query, alias } => {
                if let Some(alias) = alias {
                    self.refs.push(TableRef {
                        schema: None,
                        table: alias.value.clone(),
                        alias: None,
                        context: TableContext::Subquery,
                    });
                }
                self.query(query);
            }
            TableNode::Nested(inner) => self.table_with_joins(inner),
            TableNode::Opaque => {}
        }
    }

    /// The written relation of an UPDATE or DELETE; anything it joins is read
    fn target(&mut self, twj: &TableWithJoins) {
        match classify_table(&twj.relation) {
            TableNode::Base { name, alias } => self.push_object(name, alias, TableContext::Target),
            _ => self.relation(&twj.relation, TableContext::From),
        }
        for join in &twj.joins {
            self.relation(&join.relation, TableContext::JoinRight);
        }
    }

    fn expr_subqueries(&mut self, expr: &Expr) {
        walk_expr(expr, |reached| {
            if let Reached::Query(query) = reached {
                self.query(query);
            }
        });
    }

    fn is_cte(&self, name: &ObjectName) -> bool {
        let (None, bare) = split_qualified(name) else {
            return false;
        };
        self.ctes
            .iter()
            .flatten()
            .any(|cte| cte.eq_ignore_ascii_case(&bare))
    }

    fn push_object(&mut self, name: &ObjectName, alias: Option<&Ident>, context: TableContext) {
        let (schema, table) = split_qualified(name);
        self.refs.push(TableRef {
            schema,
            table,
            alias: alias.map(|a| a.value.clone()),
            context,
        });
    }
}

#[cfg(test)]
#[path = "tables_test.rs"]
mod tests;
