use crate::{
    ast::expr::{Expr, FunctionCall, Ident},
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Value(val) => r.add_param(val.clone()),
            Expr::FunctionCall(func) => func.render(r),
            Expr::Alias { expr, alias } => {
                expr.render(r);
                r.sql.push_str(" AS ");
                r.push_identifier(alias);
            }
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) {
        if let Some(qualifier) = &self.qualifier {
            r.push_identifier(qualifier);
            r.sql.push('.');
        }
        r.push_identifier(&self.name);
    }
}

impl Render for FunctionCall {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&self.name);
        r.sql.push('(');
        if self.wildcard {
            r.sql.push('*');
        } else {
            r.push_list(&self.args, ", ");
        }
        r.sql.push(')');
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::expr::{Expr, FunctionCall},
        dialect::MySql,
        ident, ident_as,
        renderer::{Render, Renderer},
    };

    fn render(expr: &Expr) -> String {
        let mut r = Renderer::inline(&MySql);
        expr.render(&mut r);
        r.finish().0
    }

    #[test]
    fn test_render_wildcard_is_unquoted() {
        assert_eq!(render(&crate::ident("user.*")), "`user`.*");
    }

    #[test]
    fn test_render_alias() {
        assert_eq!(
            render(&ident_as!("phone", "phone", "user_phone")),
            "`phone`.`phone` AS `user_phone`"
        );
    }

    #[test]
    fn test_render_function_call() {
        let count = Expr::Alias {
            expr: Box::new(Expr::FunctionCall(FunctionCall {
                name: "COUNT".into(),
                args: vec![ident!("user", "id")],
                wildcard: false,
            })),
            alias: "count".into(),
        };
        assert_eq!(render(&count), "COUNT(`user`.`id`) AS `count`");
    }
}
