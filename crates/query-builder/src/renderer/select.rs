use crate::{
    ast::{
        common::{JoinKind, TableRef},
        select::{FromClause, JoinClause, OrderByExpr, Select},
    },
    renderer::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        // 1. SELECT clause
        r.sql.push_str("SELECT ");
        if self.columns.is_empty() {
            r.sql.push('*');
        } else {
            r.push_list(&self.columns, ", ");
        }

        // 2. FROM
        if let Some(from) = &self.from {
            r.sql.push(' ');
            from.render(r);
        }

        // 3. JOIN
        for join in &self.joins {
            r.sql.push(' ');
            join.render(r);
        }

        // 4. WHERE
        if !self.where_clause.is_empty() {
            r.sql.push_str(" WHERE ");
            self.where_clause.render(r);
        }

        // 5. ORDER BY
        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            r.push_list(&self.order_by, ", ");
        }

        // 6. LIMIT
        if let Some(limit) = &self.limit {
            r.sql.push_str(" LIMIT ");
            limit.render(r);
        }

        // 7. OFFSET
        if let Some(offset) = &self.offset {
            r.sql.push_str(" OFFSET ");
            offset.render(r);
        }
    }
}

impl Render for TableRef {
    fn render(&self, r: &mut Renderer) {
        if let Some(schema) = &self.schema {
            r.push_identifier(schema);
            r.sql.push('.');
        }
        r.push_identifier(&self.name);
    }
}

impl Render for FromClause {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("FROM ");
        self.table.render(r);
        if let Some(alias) = &self.alias {
            r.sql.push_str(" AS ");
            r.push_identifier(alias);
        }
    }
}

impl Render for JoinClause {
    fn render(&self, r: &mut Renderer) {
        let join_str = match self.kind {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
        };
        r.sql.push_str(&format!("{join_str} "));
        self.table.render(r);
        if let Some(alias) = &self.alias {
            r.sql.push_str(" AS ");
            r.push_identifier(alias);
        }
        r.sql.push_str(" ON ");
        self.on.render(r);
    }
}

impl Render for OrderByExpr {
    fn render(&self, r: &mut Renderer) {
        self.expr.render(r);
        if let Some(dir) = &self.direction {
            r.sql.push(' ');
            r.sql.push_str(&dir.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::{
        ast::{
            common::{JoinKind, OrderDir},
            expr::{BinaryOperator, Expr, FunctionCall},
            predicate::{Conjunction, Predicate, WhereClause},
            select::{FromClause, JoinClause, OrderByExpr, Select},
        },
        dialect::{MySql, Postgres},
        ident, ident_as,
        renderer::{Render, Renderer},
        table_ref, value,
    };

    fn users_from(alias: Option<&str>) -> Option<FromClause> {
        Some(FromClause {
            table: table_ref!("users"),
            alias: alias.map(String::from),
        })
    }

    #[test]
    fn test_simple_select_postgres() {
        let mut where_clause = WhereClause::default();
        where_clause.push(
            Conjunction::And,
            Predicate::Compare {
                left: ident!("id"),
                op: BinaryOperator::Eq,
                right: value!(Value::Int(123)),
            },
        );
        let ast = Select {
            columns: vec![ident!("id"), ident!("name")],
            from: users_from(None),
            where_clause,
            ..Default::default()
        };

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(sql, r#"SELECT "id", "name" FROM "users" WHERE "id" = $1"#);
        assert_eq!(params, vec![Value::Int(123)]);
    }

    #[test]
    fn test_simple_select_mysql_inline() {
        let mut where_clause = WhereClause::default();
        where_clause.push(
            Conjunction::And,
            Predicate::Compare {
                left: ident!("name"),
                op: BinaryOperator::Eq,
                right: value!(Value::String("abc".to_string())),
            },
        );
        let ast = Select {
            from: users_from(None),
            where_clause,
            ..Default::default()
        };

        let dialect = MySql;
        let mut renderer = Renderer::inline(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(sql, "SELECT * FROM `users` WHERE `name` = 'abc'");
        assert!(params.is_empty());
    }

    #[test]
    fn test_complex_select_postgres() {
        let mut where_clause = WhereClause::default();
        where_clause.push(
            Conjunction::And,
            Predicate::Compare {
                left: ident!("u", "status"),
                op: BinaryOperator::NotEq,
                right: value!(Value::String("inactive".to_string())),
            },
        );
        let ast = Select {
            columns: vec![
                ident!("u", "id"),
                Expr::Alias {
                    expr: Box::new(Expr::FunctionCall(FunctionCall {
                        name: "COUNT".to_string(),
                        args: vec![ident!("p", "id")],
                        wildcard: false,
                    })),
                    alias: "post_count".to_string(),
                },
            ],
            from: users_from(Some("u")),
            joins: vec![JoinClause {
                kind: JoinKind::Left,
                table: table_ref!("posts"),
                alias: Some("p".to_string()),
                on: Predicate::Compare {
                    left: ident!("u", "id"),
                    op: BinaryOperator::Eq,
                    right: ident!("p", "user_id"),
                },
            }],
            where_clause,
            order_by: vec![OrderByExpr {
                expr: ident!("u", "created_at"),
                direction: Some(OrderDir::Desc),
            }],
            limit: Some(value!(Value::Int(10))),
            offset: Some(value!(Value::Int(20))),
        };

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        let expected_sql = r#"SELECT "u"."id", COUNT("p"."id") AS "post_count" FROM "users" AS "u" LEFT JOIN "posts" AS "p" ON "u"."id" = "p"."user_id" WHERE "u"."status" != $1 ORDER BY "u"."created_at" DESC LIMIT $2 OFFSET $3"#;
        assert_eq!(sql, expected_sql);
        assert_eq!(
            params,
            vec![
                Value::String("inactive".to_string()),
                Value::Int(10),
                Value::Int(20)
            ]
        );
    }

    #[test]
    fn test_inner_join_and_schema_mysql() {
        let ast = Select {
            columns: vec![ident_as!("o", "total", "order_total")],
            from: Some(FromClause {
                table: table_ref!("shop", "orders"),
                alias: Some("o".into()),
            }),
            joins: vec![JoinClause {
                kind: JoinKind::Inner,
                table: table_ref!("shop", "customers"),
                alias: Some("c".into()),
                on: Predicate::Compare {
                    left: ident!("o", "customer_id"),
                    op: BinaryOperator::Eq,
                    right: ident!("c", "id"),
                },
            }],
            ..Default::default()
        };

        let mut renderer = Renderer::inline(&MySql);
        ast.render(&mut renderer);

        assert_eq!(
            renderer.finish().0,
            "SELECT `o`.`total` AS `order_total` FROM `shop`.`orders` AS `o` INNER JOIN `shop`.`customers` AS `c` ON `o`.`customer_id` = `c`.`id`"
        );
    }
}
