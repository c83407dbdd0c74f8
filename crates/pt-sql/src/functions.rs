//! Function call extraction

use crate::blocks::{for_each_block, QueryBlock};
use crate::record::FunctionResult;
use crate::tree::{split_qualified, walk_expr, Reached};
use sqlparser::ast::{Expr, Statement};
use std::collections::HashSet;

/// Every function call site of a statement
///
/// Nested calls come out in post-order, so `upper(lower(x))` yields
/// `lower` before `upper`. Calls inside subqueries carry the clause they
/// appear in within the subquery.
pub fn extract_functions(stmt: &Statement) -> Vec<FunctionResult> {
    let mut results = Vec::new();
    for_each_block(stmt, &mut |block: &QueryBlock<'_>| {
        for (context, expr) in block.clauses() {
            walk_expr(expr, |reached| {
                if let Reached::Expr(Expr::Function(func)) = reached {
                    let (schema, function_name) = split_qualified(&func.name);
                    results.push(FunctionResult {
                        function_name,
                        schema,
                        context: *context,
                    });
                }
            });
        }
    });
    results
}

/// Distinct function names in first-seen order
pub fn function_names(records: &[FunctionResult]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.function_name.as_str()))
        .map(|r| r.function_name.clone())
        .collect()
}

#[cfg(test)]
#[path = "functions_test.rs"]
mod tests;
