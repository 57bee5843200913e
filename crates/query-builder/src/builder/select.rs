//! Provides a builder for constructing `Select` ASTs.

use std::sync::Arc;

use crate::{
    ast::{
        common::{JoinKind, OrderDir, TableRef},
        expr::{BinaryOperator, Expr, FunctionCall},
        predicate::{Conjunction, Predicate},
        select::{FromClause, JoinClause, OrderByExpr, Select},
    },
    builder::QueryBuilder,
    dialect::Dialect,
    ident,
    renderer::{Render, Renderer},
    table_ref, value,
};
use model::core::value::Value;

#[derive(Clone)]
pub struct SelectBuilder {
    ast: Select,
    dialect: Arc<dyn Dialect>,
}

impl std::fmt::Debug for SelectBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectBuilder")
            .field("ast", &self.ast)
            .field("dialect", &self.dialect.name())
            .finish()
    }
}

impl SelectBuilder {
    /// Starts a query reading from `table`.
    pub fn new(table: TableRef, dialect: Arc<dyn Dialect>) -> Self {
        let ast = Select {
            from: Some(FromClause { table, alias: None }),
            ..Default::default()
        };
        Self { ast, dialect }
    }

    pub fn ast(&self) -> &Select {
        &self.ast
    }

    /// Finalizes and returns the constructed `Select` AST.
    pub fn build(self) -> Select {
        self.ast
    }

    /// Renders with dialect placeholders instead of inline literals.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut renderer = Renderer::new(self.dialect.as_ref());
        self.ast.render(&mut renderer);
        renderer.finish()
    }

    fn and_where(&mut self, predicate: Predicate) {
        self.ast.where_clause.push(Conjunction::And, predicate);
    }

    fn scoped(&self) -> Self {
        Self {
            ast: Select::default(),
            dialect: Arc::clone(&self.dialect),
        }
    }
}

impl QueryBuilder for SelectBuilder {
    fn where_op(&mut self, field: &str, op: BinaryOperator, val: Value) {
        self.and_where(Predicate::Compare {
            left: ident(field),
            op,
            right: value(val),
        });
    }

    fn where_null(&mut self, field: &str) {
        self.and_where(Predicate::Null {
            expr: ident(field),
            negated: false,
        });
    }

    fn where_not_null(&mut self, field: &str) {
        self.and_where(Predicate::Null {
            expr: ident(field),
            negated: true,
        });
    }

    fn where_in(&mut self, field: &str, values: Vec<Value>) {
        self.and_where(Predicate::InList {
            expr: ident(field),
            list: values.into_iter().map(value).collect(),
            negated: false,
        });
    }

    fn where_not_in(&mut self, field: &str, values: Vec<Value>) {
        self.and_where(Predicate::InList {
            expr: ident(field),
            list: values.into_iter().map(value).collect(),
            negated: true,
        });
    }

    fn where_between(&mut self, field: &str, low: Value, high: Value) {
        self.and_where(Predicate::Between {
            expr: ident(field),
            low: value(low),
            high: value(high),
        });
    }

    fn or_where<F>(&mut self, scope: F)
    where
        F: FnOnce(&mut Self),
    {
        let mut inner = self.scoped();
        scope(&mut inner);
        let clause = inner.ast.where_clause;
        if clause.is_empty() {
            return;
        }
        self.ast
            .where_clause
            .push(Conjunction::Or, Predicate::Group(clause));
    }

    fn left_join(&mut self, table: &str, alias: &str, left: &str, right: &str) {
        self.ast.joins.push(JoinClause {
            kind: JoinKind::Left,
            table: table_ref!(table),
            alias: Some(alias.to_string()),
            on: Predicate::Compare {
                left: ident(left),
                op: BinaryOperator::Eq,
                right: ident(right),
            },
        });
    }

    fn order_by(&mut self, field: &str, direction: OrderDir) {
        self.ast.order_by.push(OrderByExpr {
            expr: ident(field),
            direction: Some(direction),
        });
    }

    fn select(&mut self, columns: Vec<Expr>) {
        self.ast.columns.extend(columns);
    }

    fn offset(&mut self, offset: usize) {
        self.ast.offset = (offset > 0).then(|| value(Value::from(offset)));
    }

    fn limit(&mut self, limit: usize) {
        self.ast.limit = Some(value(Value::from(limit)));
    }

    fn count(&mut self, field: &str, alias: &str) {
        self.ast.columns.push(Expr::Alias {
            expr: Box::new(Expr::FunctionCall(FunctionCall {
                name: "COUNT".to_string(),
                args: vec![ident(field)],
                wildcard: false,
            })),
            alias: alias.to_string(),
        });
    }

    fn to_query(&self) -> String {
        let mut renderer = Renderer::inline(self.dialect.as_ref());
        self.ast.render(&mut renderer);
        renderer.finish().0
    }
}
