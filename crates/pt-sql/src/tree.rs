//! Node-kind view of the sqlparser AST
//!
//! The extractors never match on sqlparser's expression or table-factor
//! enums directly. They ask this module what kind of node they hold and
//! recurse on what it hands back, which keeps parser-version churn in one
//! place.

use sqlparser::ast::{
    BinaryOperator, Expr, Function, Ident, Join, JoinConstraint, JoinOperator, ObjectName,
    ObjectNamePart, Query, TableFactor, TableWithJoins, UnaryOperator, Value, Visit, Visitor,
};
use std::ops::ControlFlow;

/// A column reference, split into its table qualifier and bare name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnName {
    /// Name part immediately before the column (`t` in `s.t.c`)
    pub table: Option<String>,
    /// Bare column name
    pub column: String,
}

impl ColumnName {
    /// Read a column reference out of an identifier expression
    pub fn from_expr(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Identifier(ident) => Some(Self {
                table: None,
                column: ident.value.clone(),
            }),
            Expr::CompoundIdentifier(idents) => {
                let (column, qualifier) = idents.split_last()?;
                Some(Self {
                    table: qualifier.last().map(|i| i.value.clone()),
                    column: column.value.clone(),
                })
            }
            _ => None,
        }
    }
}

/// Kind of an expression node
#[derive(Debug)]
pub enum ExprNode<'a> {
    /// `left AND right`
    Conjunction { left: &'a Expr, right: &'a Expr },
    /// `left OR right`
    Disjunction { left: &'a Expr, right: &'a Expr },
    /// `NOT expr`
    Negation(&'a Expr),
    /// Binary comparison (`=`, `<>`, `<`, `<=`, `>`, `>=`)
    Comparison {
        left: &'a Expr,
        op: &'a BinaryOperator,
        right: &'a Expr,
    },
    /// Column reference
    Column(ColumnName),
    /// Literal, signed number, typed string or bind parameter
    Literal,
    /// Function call
    Call(&'a Function),
    /// Parenthesized expression
    Nested(&'a Expr),
    /// Anything else
    Other,
}

/// Classify a single expression node
pub fn classify(expr: &Expr) -> ExprNode<'_> {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And,
            right,
        } => ExprNode::Conjunction { left, right },
        Expr::BinaryOp {
            left,
            op: BinaryOperator::Or,
            right,
        } => ExprNode::Disjunction { left, right },
        Expr::BinaryOp { left, op, right } if is_comparison(op) => {
            ExprNode::Comparison { left, op, right }
        }
        Expr::UnaryOp {
            op: UnaryOperator::Not,
            expr,
        } => ExprNode::Negation(expr),
        Expr::Identifier(_) | Expr::CompoundIdentifier(_) => {
            ColumnName::from_expr(expr).map_or(ExprNode::Other, ExprNode::Column)
        }
        Expr::Function(func) => ExprNode::Call(func),
        Expr::Nested(inner) => ExprNode::Nested(inner),
        _ if is_literal(expr) => ExprNode::Literal,
        _ => ExprNode::Other,
    }
}

fn is_comparison(op: &BinaryOperator) -> bool {
    matches!(
        op,
        BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::Lt
            | BinaryOperator::LtEq
            | BinaryOperator::Gt
            | BinaryOperator::GtEq
    )
}

fn is_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Value(_) | Expr::TypedString { .. } => true,
        Expr::UnaryOp {
            op: UnaryOperator::Minus | UnaryOperator::Plus,
            expr,
        } => matches!(expr.as_ref(), Expr::Value(v) if matches!(v.value, Value::Number(..))),
        _ => false,
    }
}

/// Comparison operator with its operands swapped (`a < b` ⇔ `b > a`)
pub fn mirror(op: &BinaryOperator) -> BinaryOperator {
    match op {
        BinaryOperator::Lt => BinaryOperator::Gt,
        BinaryOperator::LtEq => BinaryOperator::GtEq,
        BinaryOperator::Gt => BinaryOperator::Lt,
        BinaryOperator::GtEq => BinaryOperator::LtEq,
        other => other.clone(),
    }
}

/// Strip any number of enclosing parentheses
pub fn unwrap_nested(mut expr: &Expr) -> &Expr {
    while let Expr::Nested(inner) = expr {
        expr = inner.as_ref();
    }
    expr
}

/// Node reached by [`walk_expr`]
#[derive(Debug, Clone, Copy)]
pub enum Reached<'n> {
    /// An expression of the walked tree
    Expr(&'n Expr),
    /// A query nested in the walked tree; its contents are not walked
    Query(&'n Query),
}

/// Walk an expression tree in post-order
///
/// Every expression node is reported after its operands, so a nested call
/// is seen before the call that encloses it. Nested queries (scalar
/// subqueries, `IN (SELECT ..)`, `EXISTS`) are reported once as
/// [`Reached::Query`] and not descended into: they are separate query
/// blocks with their own scope.
pub fn walk_expr<F>(expr: &Expr, f: F)
where
    F: FnMut(Reached<'_>),
{
    let mut walker = ShallowWalker { f, query_depth: 0 };
    let _ = expr.visit(&mut walker);
}

struct ShallowWalker<F> {
    f: F,
    query_depth: usize,
}

impl<F> Visitor for ShallowWalker<F>
where
    F: FnMut(Reached<'_>),
{
    type Break = ();

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        if self.query_depth == 0 {
            (self.f)(Reached::Query(query));
        }
        self.query_depth += 1;
        ControlFlow::Continue(())
    }

    fn post_visit_query(&mut self, _query: &Query) -> ControlFlow<Self::Break> {
        self.query_depth -= 1;
        ControlFlow::Continue(())
    }

    fn post_visit_expr(&mut self, expr: &Expr) -> ControlFlow<Self::Break> {
        if self.query_depth == 0 {
            (self.f)(Reached::Expr(expr));
        }
        ControlFlow::Continue(())
    }
}

/// Column references in an expression, outside nested queries
pub fn column_refs(expr: &Expr) -> Vec<ColumnName> {
    let mut refs = Vec::new();
    walk_expr(expr, |reached| {
        if let Reached::Expr(e) = reached {
            if let Some(column) = ColumnName::from_expr(e) {
                refs.push(column);
            }
        }
    });
    refs
}

/// Kind of a table factor
#[derive(Debug)]
pub enum TableNode<'a> {
    /// Named table (or CTE reference)
    Base {
        name: &'a ObjectName,
        alias: Option<&'a Ident>,
    },
    /// Subquery in FROM
    Derived {
        query: &'a Query,
        alias: Option<&'a Ident>,
    },
    /// Parenthesized join
    Nested(&'a TableWithJoins),
    /// Table functions, UNNEST, PIVOT and other shapes with no table name
    Opaque,
}

/// Classify a table factor
pub fn classify_table(factor: &TableFactor) -> TableNode<'_> {
    match factor {
        TableFactor::Table { name, alias, .. } => TableNode::Base {
            name,
            alias: alias.as_ref().map(|a| &a.name),
        },
        TableFactor::Derived {
            subquery, alias, ..
        } => TableNode::Derived {
            query: subquery,
            alias: alias.as_ref().map(|a| &a.name),
        },
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => TableNode::Nested(table_with_joins),
        _ => TableNode::Opaque,
    }
}

/// The ON expression of a join, if it has one
pub fn join_condition(join: &Join) -> Option<&Expr> {
    let constraint = match &join.join_operator {
        JoinOperator::Join(c)
        | JoinOperator::Inner(c)
        | JoinOperator::Left(c)
        | JoinOperator::LeftOuter(c)
        | JoinOperator::Right(c)
        | JoinOperator::RightOuter(c)
        | JoinOperator::FullOuter(c)
        | JoinOperator::LeftSemi(c)
        | JoinOperator::RightSemi(c)
        | JoinOperator::LeftAnti(c)
        | JoinOperator::RightAnti(c) => c,
        _ => return None,
    };
    match constraint {
        JoinConstraint::On(expr) => Some(expr),
        _ => None,
    }
}

/// Unquoted name parts of an object name
pub fn name_parts(name: &ObjectName) -> Vec<String> {
    name.0
        .iter()
        .map(|part| match part {
            ObjectNamePart::Identifier(ident) => ident.value.clone(),
            other => other.to_string(),
        })
        .collect()
}

/// Split an object name into (qualifier, last part)
///
/// The qualifier joins every part but the last with `.`.
pub fn split_qualified(name: &ObjectName) -> (Option<String>, String) {
    let mut parts = name_parts(name);
    let last = parts.pop().unwrap_or_default();
    let qualifier = if parts.is_empty() {
        None
    } else {
        Some(parts.join("."))
    };
    (qualifier, last)
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tests;
