//! Filter predicate extraction
//!
//! Filters are the WHERE, HAVING, JOIN ON and QUALIFY expressions of every
//! query block. Each is split on AND into conjuncts; OR and NOT stay whole.
//! The coarse form reports every conjunct as SQL text, the detailed form
//! only `column <op> literal` comparisons.

use crate::blocks::{for_each_block, QueryBlock};
use crate::record::{DetailedWhereConditionResult, WhereConditionResult};
use crate::scope::Scope;
use crate::tree::{classify, mirror, unwrap_nested, ColumnName, ExprNode};
use sqlparser::ast::{BinaryOperator, Expr, Statement};

/// Split an AND-chain into its conjuncts, looking through parentheses
pub fn conjuncts(expr: &Expr) -> Vec<&Expr> {
    let mut out = Vec::new();
    collect_conjuncts(expr, &mut out);
    out
}

fn collect_conjuncts<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match classify(unwrap_nested(expr)) {
        ExprNode::Conjunction { left, right } => {
            collect_conjuncts(left, out);
            collect_conjuncts(right, out);
        }
        _ => out.push(expr),
    }
}

/// Every filter conjunct of a statement, with its clause and table
pub fn extract_where_conditions(stmt: &Statement) -> Vec<WhereConditionResult> {
    let mut results = Vec::new();
    for_each_block(stmt, &mut |block: &QueryBlock<'_>| {
        let scope = Scope::of_block(block);
        for (context, filter) in block.filters() {
            for conjunct in conjuncts(filter) {
                results.push(WhereConditionResult {
                    condition: conjunct.to_string(),
                    table_name: scope.attribute(conjunct),
                    context,
                });
            }
        }
    });
    results
}

/// Filter conjuncts of the form `column <op> literal`, oriented column-first
pub fn extract_where_conditions_detailed(stmt: &Statement) -> Vec<DetailedWhereConditionResult> {
    let mut results = Vec::new();
    for_each_block(stmt, &mut |block: &QueryBlock<'_>| {
        let scope = Scope::of_block(block);
        for (context, filter) in block.filters() {
            for conjunct in conjuncts(filter) {
                let Some(cmp) = ColumnComparison::from_expr(conjunct) else {
                    continue;
                };
                results.push(DetailedWhereConditionResult {
                    column_name: cmp.column.column,
                    operator_type: cmp.op.to_string(),
                    value: cmp.literal.to_string(),
                    table_name: scope.attribute(conjunct),
                    context,
                });
            }
        }
    });
    results
}

/// A comparison between one column and one literal
#[derive(Debug)]
struct ColumnComparison<'a> {
    column: ColumnName,
    op: BinaryOperator,
    literal: &'a Expr,
}

impl<'a> ColumnComparison<'a> {
    fn from_expr(expr: &'a Expr) -> Option<Self> {
        let ExprNode::Comparison { left, op, right } = classify(unwrap_nested(expr)) else {
            return None;
        };
        let (left, right) = (unwrap_nested(left), unwrap_nested(right));
        match (classify(left), classify(right)) {
            (ExprNode::Column(column), ExprNode::Literal) => Some(Self {
                column,
                op: op.clone(),
                literal: right,
            }),
            (ExprNode::Literal, ExprNode::Column(column)) => Some(Self {
                column,
                op: mirror(op),
                literal: left,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "predicates_test.rs"]
mod tests;
