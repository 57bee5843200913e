//! Defines common, reusable AST nodes for building SQL queries.

use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDir {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid order direction `{0}`, expected `asc` or `desc`")]
pub struct ParseOrderDirError(pub String);

impl FromStr for OrderDir {
    type Err = ParseOrderDirError;

    /// Case-insensitive: `asc`, `ASC` and `Asc` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(OrderDir::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(OrderDir::Desc)
        } else {
            Err(ParseOrderDirError(s.to_string()))
        }
    }
}

impl fmt::Display for OrderDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDir::Asc => f.write_str("ASC"),
            OrderDir::Desc => f.write_str("DESC"),
        }
    }
}
