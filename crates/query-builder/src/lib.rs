use crate::ast::expr::{Expr, Ident};
use model::core::value::Value;

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod macros;
pub mod renderer;

/// Parses `name` or `qualifier.name` into an identifier expression.
pub fn ident(name: &str) -> Expr {
    Expr::Identifier(Ident::parse(name))
}

pub fn value(val: Value) -> Expr {
    Expr::Value(val)
}
