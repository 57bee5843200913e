//! Boolean conditions used by `WHERE` and `JOIN ... ON`.

use crate::ast::expr::{BinaryOperator, Expr};

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `left <op> right`
    Compare {
        left: Expr,
        op: BinaryOperator,
        right: Expr,
    },

    /// `expr IS NULL` or `expr IS NOT NULL`
    Null { expr: Expr, negated: bool },

    /// `expr IN (...)` or `expr NOT IN (...)`
    InList {
        expr: Expr,
        list: Vec<Expr>,
        negated: bool,
    },

    /// `expr BETWEEN low AND high`, inclusive on both ends.
    Between { expr: Expr, low: Expr, high: Expr },

    /// A parenthesized sub-clause.
    Group(WhereClause),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhereItem {
    /// How this item attaches to the one before it. Ignored for the first item.
    pub conjunction: Conjunction,
    pub predicate: Predicate,
}

/// A flat, ordered chain of predicates, e.g. `a = 1 AND b > 2 OR (c IS NULL)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    pub items: Vec<WhereItem>,
}

impl WhereClause {
    pub fn push(&mut self, conjunction: Conjunction, predicate: Predicate) {
        self.items.push(WhereItem {
            conjunction,
            predicate,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
