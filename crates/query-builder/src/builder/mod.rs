//! The mutable builder seam the search layer writes into.

use crate::ast::{common::OrderDir, expr::BinaryOperator, expr::Expr};
use model::core::value::Value;

pub mod select;

/// Accumulates the clauses of one `SELECT` statement.
///
/// Field arguments are physical references such as `user.id` or `phone2.phone`;
/// implementations split them into qualifier and column and take care of
/// quoting. Every `where_*` call is AND-ed onto what is already there.
pub trait QueryBuilder {
    fn where_op(&mut self, field: &str, op: BinaryOperator, value: Value);

    fn where_null(&mut self, field: &str);

    fn where_not_null(&mut self, field: &str);

    fn where_in(&mut self, field: &str, values: Vec<Value>);

    fn where_not_in(&mut self, field: &str, values: Vec<Value>);

    fn where_between(&mut self, field: &str, low: Value, high: Value);

    /// Runs `scope` against a fresh builder and OR-s whatever it added onto the
    /// current condition as one parenthesized group. An empty scope adds nothing.
    fn or_where<F>(&mut self, scope: F)
    where
        F: FnOnce(&mut Self),
        Self: Sized;

    /// `LEFT JOIN table AS alias ON left = right`
    fn left_join(&mut self, table: &str, alias: &str, left: &str, right: &str);

    fn order_by(&mut self, field: &str, direction: OrderDir);

    fn select(&mut self, columns: Vec<Expr>);

    /// An offset of 0 leaves the clause out.
    fn offset(&mut self, offset: usize);

    fn limit(&mut self, limit: usize);

    /// Selects `COUNT(field) AS alias`.
    fn count(&mut self, field: &str, alias: &str);

    /// Renders the accumulated state into executable statement text.
    fn to_query(&self) -> String;
}
