//! Applies a [`Filter`] to a [`QueryBuilder`] as boolean predicates.

use crate::filter::{
    condition::{Condition, OpCondition},
    group::{Filter, FilterGroup},
};
use model::core::value::Value;
use query_builder::{ast::expr::BinaryOperator, builder::QueryBuilder};

/// Adds the predicates for `filter` to `builder`.
///
/// Field names are used as given, so callers qualify them first. A list of
/// two or more groups becomes one OR-ed scope per group; a list with a single
/// group is applied as if it were that group.
pub fn translate<B: QueryBuilder>(builder: &mut B, filter: &Filter) {
    match filter {
        Filter::Group(group) => apply_group(builder, group),
        Filter::AnyOf(groups) => match groups.as_slice() {
            [] => {}
            [only] => apply_group(builder, only),
            groups => {
                for group in groups {
                    builder.or_where(|scope| apply_group(scope, group));
                }
            }
        },
    }
}

fn apply_group<B: QueryBuilder>(builder: &mut B, group: &FilterGroup) {
    for (field, condition) in &group.entries {
        apply_condition(builder, field, condition);
    }
}

fn apply_condition<B: QueryBuilder>(builder: &mut B, field: &str, condition: &Condition) {
    match condition {
        Condition::Value(Value::Null) => builder.where_null(field),
        Condition::Value(value) => builder.where_op(field, BinaryOperator::Eq, value.clone()),
        Condition::Ops(ops) => {
            for op in ops {
                apply_op(builder, field, op);
            }
        }
    }
}

fn apply_op<B: QueryBuilder>(builder: &mut B, field: &str, op: &OpCondition) {
    match op {
        // `= NULL` never matches anything
        OpCondition::Eq(Value::Null) => builder.where_null(field),
        OpCondition::Ne(Value::Null) => builder.where_not_null(field),
        OpCondition::Eq(v) => builder.where_op(field, BinaryOperator::Eq, v.clone()),
        OpCondition::Gt(v) => builder.where_op(field, BinaryOperator::Gt, v.clone()),
        OpCondition::Gte(v) => builder.where_op(field, BinaryOperator::GtEq, v.clone()),
        OpCondition::Lt(v) => builder.where_op(field, BinaryOperator::Lt, v.clone()),
        OpCondition::Lte(v) => builder.where_op(field, BinaryOperator::LtEq, v.clone()),
        OpCondition::Ne(v) => builder.where_op(field, BinaryOperator::NotEq, v.clone()),
        OpCondition::Null => builder.where_null(field),
        OpCondition::NotNull => builder.where_not_null(field),
        OpCondition::In(values) => builder.where_in(field, values.clone()),
        OpCondition::NotIn(values) => builder.where_not_in(field, values.clone()),
        OpCondition::Like(pattern) => {
            builder.where_op(field, BinaryOperator::Like, Value::String(pattern.clone()))
        }
        OpCondition::Between(low, high) => builder.where_between(field, low.clone(), high.clone()),
    }
}
