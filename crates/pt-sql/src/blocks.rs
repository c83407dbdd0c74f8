//! Query-block traversal
//!
//! A query block is one SELECT, VALUES list, or the filter part of an UPDATE / DELETE:
//! the relations it reads, and every clause expression tagged with the
//! clause it belongs to. [`for_each_block`] reaches every block of a
//! statement: CTE bodies, both sides of set operations, derived tables and
//! subqueries nested in expressions.

use crate::record::ClauseContext;
use crate::tree::{classify_table, join_condition, walk_expr, Reached, TableNode};
use sqlparser::ast::{
    Delete, Expr, FromTable, GroupByExpr, OrderByKind, Query, Select, SelectItem, SetExpr,
    Statement, TableWithJoins, UpdateTableFromKind,
};

/// One SELECT-like unit of a statement
#[derive(Debug, Default)]
pub struct QueryBlock<'a> {
    from: Vec<&'a TableWithJoins>,
    clauses: Vec<(ClauseContext, &'a Expr)>,
}

impl<'a> QueryBlock<'a> {
    /// Build a block from its FROM items; join conditions become JOIN_ON clauses
    fn new(from: Vec<&'a TableWithJoins>) -> Self {
        let mut clauses = Vec::new();
        for twj in &from {
            collect_join_conditions(twj, &mut clauses);
        }
        Self { from, clauses }
    }

    fn push(&mut self, context: ClauseContext, expr: &'a Expr) {
        self.clauses.push((context, expr));
    }

    /// Relations the block reads, as written in FROM
    pub fn from(&self) -> &[&'a TableWithJoins] {
        &self.from
    }

    /// Clause expressions in source order
    pub fn clauses(&self) -> &[(ClauseContext, &'a Expr)] {
        &self.clauses
    }

    /// Boolean filter expressions: JOIN ON, WHERE, HAVING and QUALIFY
    pub fn filters(&self) -> impl Iterator<Item = (ClauseContext, &'a Expr)> + '_ {
        self.clauses.iter().copied().filter(|(context, _)| {
            matches!(
                context,
                ClauseContext::JoinOn
                    | ClauseContext::Where
                    | ClauseContext::Having
                    | ClauseContext::Qualify
            )
        })
    }
}

fn collect_join_conditions<'a>(
    twj: &'a TableWithJoins,
    clauses: &mut Vec<(ClauseContext, &'a Expr)>,
) {
    if let TableNode::Nested(inner) = classify_table(&twj.relation) {
        collect_join_conditions(inner, clauses);
    }
    for join in &twj.joins {
        if let TableNode::Nested(inner) = classify_table(&join.relation) {
            collect_join_conditions(inner, clauses);
        }
        if let Some(on) = join_condition(join) {
            clauses.push((ClauseContext::JoinOn, on));
        }
    }
}

/// Visit every query block of a statement, outermost first
pub fn for_each_block<F>(stmt: &Statement, f: &mut F)
where
    F: FnMut(&QueryBlock<'_>),
{
    match stmt {
        Statement::Query(query) => walk_query(query, f),
        Statement::Insert(insert) => {
            if let Some(source) = &insert.source {
                walk_query(source, f);
            }
        }
        Statement::Update(update) => {
            let mut from = vec![&update.table];
            if let Some(
                UpdateTableFromKind::BeforeSet(tables) | UpdateTableFromKind::AfterSet(tables),
            ) = &update.from
            {
                from.extend(tables);
            }
            let mut block = QueryBlock::new(from);
            for assignment in &update.assignments {
                block.push(ClauseContext::Set, &assignment.value);
            }
            if let Some(selection) = &update.selection {
                block.push(ClauseContext::Where, selection);
            }
            emit_block(&block, f);
        }
        Statement::Delete(delete) => {
            let mut block = QueryBlock::new(delete_relations(delete));
            if let Some(selection) = &delete.selection {
                block.push(ClauseContext::Where, selection);
            }
            emit_block(&block, f);
        }
        Statement::CreateTable(create) => {
            if let Some(query) = &create.query {
                walk_query(query, f);
            }
        }
        other => log::debug!("No query blocks in statement: {}", statement_keyword(other)),
    }
}

/// Tables a DELETE reads or deletes from
pub(crate) fn delete_relations(delete: &Delete) -> Vec<&TableWithJoins> {
    let mut relations: Vec<&TableWithJoins> = match &delete.from {
        FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => {
            tables.iter().collect()
        }
    };
    if let Some(using) = &delete.using {
        relations.extend(using);
    }
    relations
}

/// First keyword of a statement, for log messages
pub(crate) fn statement_keyword(stmt: &Statement) -> String {
    stmt.to_string()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_uppercase()
}

fn walk_query<F>(query: &Query, f: &mut F)
where
    F: FnMut(&QueryBlock<'_>),
{
    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            walk_query(&cte.query, f);
        }
    }

    let order_by: Vec<&Expr> = match query.order_by.as_ref().map(|o| &o.kind) {
        Some(OrderByKind::Expressions(exprs)) => exprs.iter().map(|o| &o.expr).collect(),
        _ => Vec::new(),
    };

    match query.body.as_ref() {
        SetExpr::Select(select) => emit_block(&select_block(select, &order_by), f),
        body => {
            walk_set_expr(body, f);
            if !order_by.is_empty() {
                // ORDER BY over a set operation belongs to no single SELECT
                let mut block = QueryBlock::default();
                for expr in order_by {
                    block.push(ClauseContext::OrderBy, expr);
                }
                emit_block(&block, f);
            }
        }
    }
}

fn walk_set_expr<F>(body: &SetExpr, f: &mut F)
where
    F: FnMut(&QueryBlock<'_>),
{
    match body {
        SetExpr::Select(select) => emit_block(&select_block(select, &[]), f),
        SetExpr::Query(query) => walk_query(query, f),
        SetExpr::SetOperation { left, right, .. } => {
            walk_set_expr(left, f);
            walk_set_expr(right, f);
        }
        SetExpr::Values(values) => {
            let mut block = QueryBlock::new(Vec::new());
            for expr in values.rows.iter().flatten() {
                block.push(ClauseContext::Values, expr);
            }
            emit_block(&block, f);
        }
        SetExpr::Insert(stmt) | SetExpr::Update(stmt) | SetExpr::Delete(stmt) => {
            for_each_block(stmt, f)
        }
        _ => {}
    }
}

pub(crate) fn select_block<'a>(select: &'a Select, order_by: &[&'a Expr]) -> QueryBlock<'a> {
    let mut block = QueryBlock::new(select.from.iter().collect());

    // JOIN ON conditions were collected first; projection goes in front of them
    let joins = std::mem::take(&mut block.clauses);
    for item in &select.projection {
        if let SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } = item {
            block.push(ClauseContext::SelectList, expr);
        }
    }
    block.clauses.extend(joins);

    if let Some(selection) = &select.selection {
        block.push(ClauseContext::Where, selection);
    }
    if let GroupByExpr::Expressions(exprs, _) = &select.group_by {
        for expr in exprs {
            block.push(ClauseContext::GroupBy, expr);
        }
    }
    if let Some(having) = &select.having {
        block.push(ClauseContext::Having, having);
    }
    if let Some(qualify) = &select.qualify {
        block.push(ClauseContext::Qualify, qualify);
    }
    for expr in order_by {
        block.push(ClauseContext::OrderBy, expr);
    }
    block
}

/// Hand a block to the visitor, then descend into the blocks it contains
fn emit_block<F>(block: &QueryBlock<'_>, f: &mut F)
where
    F: FnMut(&QueryBlock<'_>),
{
    f(block);

    for twj in block.from() {
        walk_relations(twj, f);
    }
    for (_, expr) in block.clauses() {
        walk_expr(expr, |reached| {
            if let Reached::Query(query) = reached {
                walk_query(query, &mut *f);
            }
        });
    }
}

fn walk_relations<F>(twj: &TableWithJoins, f: &mut F)
where
    F: FnMut(&QueryBlock<'_>),
{
    let relations = std::iter::once(&twj.relation).chain(twj.joins.iter().map(|j| &j.relation));
    for factor in relations {
        match classify_table(factor) {
            TableNode::Derived { query, .. } => walk_query(query, f),
            TableNode::Nested(inner) => walk_relations(inner, f),
            TableNode::Base { .. } | TableNode::Opaque => {}
        }
    }
}

#[cfg(test)]
#[path = "blocks_test.rs"]
mod tests;
