//! Column-to-table attribution within one query block

use crate::blocks::QueryBlock;
use crate::tree::{classify_table, column_refs, split_qualified, ColumnName, TableNode};
use sqlparser::ast::{Expr, TableWithJoins};

/// A relation visible to a query block's expressions
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScopeEntry {
    /// Bare table name, or the alias of a derived table; `None` for unnamed relations
    name: Option<String>,
    alias: Option<String>,
}

impl ScopeEntry {
    /// A relation no qualifier can reach, such as `(SELECT 1)` or an unaliased table function
    fn unnamed() -> Self {
        Self {
            name: None,
            alias: None,
        }
    }
}

/// The relations of one query block, one level deep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    entries: Vec<ScopeEntry>,
}

impl Scope {
    /// Collect the FROM items of a block
    pub fn of_block(block: &QueryBlock<'_>) -> Self {
        let mut scope = Self::default();
        for twj in block.from() {
            scope.add_relations(twj);
        }
        scope
    }

    fn add_relations(&mut self, twj: &TableWithJoins) {
        let relations =
            std::iter::once(&twj.relation).chain(twj.joins.iter().map(|j| &j.relation));
        for factor in relations {
            match classify_table(factor) {
                TableNode::Base { name, alias } => self.entries.push(ScopeEntry {
                    name: Some(split_qualified(name).1),
                    alias: alias.map(|a| a.value.clone()),
                }),
                TableNode::Derived {
                    alias: Some(alias), ..
                } => self.entries.push(ScopeEntry {
                    name: Some(alias.value.clone()),
                    alias: Some(alias.value.clone()),
                }),
                TableNode::Nested(inner) => self.add_relations(inner),
                TableNode::Derived { alias: None, .. } | TableNode::Opaque => {
                    self.entries.push(ScopeEntry::unnamed())
                }
            }
        }
    }

    /// Number of visible relations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry a column reference belongs to
    fn resolve(&self, column: &ColumnName) -> Option<usize> {
        let Some(qualifier) = &column.table else {
            return (self.entries.len() == 1).then_some(0);
        };

        let by_alias = self.matching(|e| {
            e.alias
                .as_deref()
                .is_some_and(|a| a.eq_ignore_ascii_case(qualifier))
        });
        if !by_alias.is_empty() {
            return single(by_alias);
        }
        single(self.matching(|e| {
            e.name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(qualifier))
        }))
    }

    fn matching<P>(&self, pred: P) -> Vec<usize>
    where
        P: Fn(&ScopeEntry) -> bool,
    {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| pred(e))
            .map(|(i, _)| i)
            .collect()
    }

    /// Table an expression belongs to, when every column in it resolves to the same entry
    pub fn attribute(&self, expr: &Expr) -> Option<String> {
        let mut target: Option<usize> = None;
        for column in column_refs(expr) {
            let index = self.resolve(&column)?;
            match target {
                Some(t) if t != index => return None,
                _ => target = Some(index),
            }
        }
        target.and_then(|i| self.entries[i].name.clone())
    }
}

fn single(indices: Vec<usize>) -> Option<usize> {
    match indices.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

#[cfg(test)]
#[path = "scope_test.rs"]
mod tests;
