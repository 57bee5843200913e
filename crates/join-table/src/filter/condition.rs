//! Per-field filter conditions.
//!
//! A condition is either a bare value (equality) or a set of operator
//! conditions such as `{"$gte": 18, "$lt": 30}` that are AND-ed together.

use std::{fmt, str::FromStr};

use crate::error::WhereError;
use model::core::value::Value;

/// The recognized filter operators, keyed by their `$`-prefixed names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    Ne,
    Null,
    NotNull,
    In,
    NotIn,
    Like,
    Between,
}

impl Operator {
    pub const ALL: [Operator; 12] = [
        Operator::Eq,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Ne,
        Operator::Null,
        Operator::NotNull,
        Operator::In,
        Operator::NotIn,
        Operator::Like,
        Operator::Between,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::Ne => "$ne",
            Operator::Null => "$null",
            Operator::NotNull => "$notNull",
            Operator::In => "$in",
            Operator::NotIn => "$notIn",
            Operator::Like => "$like",
            Operator::Between => "$between",
        }
    }
}

impl FromStr for Operator {
    type Err = WhereError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.key() == s)
            .ok_or_else(|| WhereError::InvalidOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One operator applied to one field, carrying an operand of the right shape.
#[derive(Debug, Clone, PartialEq)]
pub enum OpCondition {
    Eq(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    Ne(Value),
    Null,
    NotNull,
    In(Vec<Value>),
    NotIn(Vec<Value>),
    Like(String),
    /// Inclusive on both ends.
    Between(Value, Value),
}

impl OpCondition {
    pub fn operator(&self) -> Operator {
        match self {
            OpCondition::Eq(_) => Operator::Eq,
            OpCondition::Gt(_) => Operator::Gt,
            OpCondition::Gte(_) => Operator::Gte,
            OpCondition::Lt(_) => Operator::Lt,
            OpCondition::Lte(_) => Operator::Lte,
            OpCondition::Ne(_) => Operator::Ne,
            OpCondition::Null => Operator::Null,
            OpCondition::NotNull => Operator::NotNull,
            OpCondition::In(_) => Operator::In,
            OpCondition::NotIn(_) => Operator::NotIn,
            OpCondition::Like(_) => Operator::Like,
            OpCondition::Between(_, _) => Operator::Between,
        }
    }

    /// Checks `operand` against what `op` expects and builds the condition.
    /// The operand of `$null` and `$notNull` is a flag and is not inspected.
    pub fn parse(op: Operator, operand: &serde_json::Value) -> Result<Self, WhereError> {
        let condition = match op {
            Operator::Eq => OpCondition::Eq(scalar(op, operand)?),
            Operator::Gt => OpCondition::Gt(scalar(op, operand)?),
            Operator::Gte => OpCondition::Gte(scalar(op, operand)?),
            Operator::Lt => OpCondition::Lt(scalar(op, operand)?),
            Operator::Lte => OpCondition::Lte(scalar(op, operand)?),
            Operator::Ne => OpCondition::Ne(scalar(op, operand)?),
            Operator::Null => OpCondition::Null,
            Operator::NotNull => OpCondition::NotNull,
            Operator::In => OpCondition::In(scalar_list(op, operand)?),
            Operator::NotIn => OpCondition::NotIn(scalar_list(op, operand)?),
            Operator::Like => match operand.as_str() {
                Some(pattern) => OpCondition::Like(pattern.to_string()),
                None => return Err(invalid_operand(op, "expected a string pattern")),
            },
            Operator::Between => {
                let bounds = scalar_list(op, operand)?;
                match <[Value; 2]>::try_from(bounds) {
                    Ok([low, high]) => OpCondition::Between(low, high),
                    Err(bounds) => {
                        return Err(invalid_operand(
                            op,
                            &format!("expected exactly 2 bounds, got {}", bounds.len()),
                        ));
                    }
                }
            }
        };
        Ok(condition)
    }
}

/// The condition attached to one field of a filter group.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Equality with a scalar or date-like value.
    Value(Value),
    /// Operator conditions, AND-ed in order.
    Ops(Vec<OpCondition>),
}

impl Condition {
    pub fn eq(value: impl Into<Value>) -> Self {
        Condition::Value(value.into())
    }

    pub fn ops(ops: impl IntoIterator<Item = OpCondition>) -> Self {
        Condition::Ops(ops.into_iter().collect())
    }

    /// Parses a JSON condition for `field`.
    ///
    /// Every key of an operator object is checked, so an unknown operator is
    /// reported wherever it appears in the object.
    pub fn from_json(field: &str, json: &serde_json::Value) -> Result<Self, WhereError> {
        match json {
            serde_json::Value::Object(object) => {
                let ops = object
                    .iter()
                    .map(|(key, operand)| {
                        let op = key.parse::<Operator>()?;
                        OpCondition::parse(op, operand)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Condition::Ops(ops))
            }
            serde_json::Value::Array(_) => Err(WhereError::InvalidCondition {
                field: field.to_string(),
                reason: "a list is not a condition, use `$in`".to_string(),
            }),
            scalar => Ok(Condition::Value(Value::from_json(scalar))),
        }
    }
}

impl From<OpCondition> for Condition {
    fn from(op: OpCondition) -> Self {
        Condition::Ops(vec![op])
    }
}

fn invalid_operand(op: Operator, reason: &str) -> WhereError {
    WhereError::InvalidOperand {
        operator: op.key().to_string(),
        reason: reason.to_string(),
    }
}

fn scalar(op: Operator, operand: &serde_json::Value) -> Result<Value, WhereError> {
    let value = Value::from_json(operand);
    if value.is_scalar() {
        Ok(value)
    } else {
        Err(invalid_operand(op, "expected a scalar value"))
    }
}

fn scalar_list(op: Operator, operand: &serde_json::Value) -> Result<Vec<Value>, WhereError> {
    let items = operand
        .as_array()
        .ok_or_else(|| invalid_operand(op, "expected an array"))?;
    items.iter().map(|item| scalar(op, item)).collect()
}
