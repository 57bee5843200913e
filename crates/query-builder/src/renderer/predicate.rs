use crate::{
    ast::predicate::{Conjunction, Predicate, WhereClause},
    renderer::{Render, Renderer},
};

impl Render for Predicate {
    fn render(&self, r: &mut Renderer) {
        match self {
            Predicate::Compare { left, op, right } => {
                left.render(r);
                r.sql.push(' ');
                r.sql.push_str(op.as_sql());
                r.sql.push(' ');
                right.render(r);
            }
            Predicate::Null { expr, negated } => {
                expr.render(r);
                r.sql
                    .push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            // An empty list can never match (IN) or always matches (NOT IN).
            Predicate::InList { list, negated, .. } if list.is_empty() => {
                r.sql.push_str(if *negated { "1 = 1" } else { "1 = 0" });
            }
            Predicate::InList {
                expr,
                list,
                negated,
            } => {
                expr.render(r);
                r.sql.push_str(if *negated { " NOT IN (" } else { " IN (" });
                r.push_list(list, ", ");
                r.sql.push(')');
            }
            Predicate::Between { expr, low, high } => {
                expr.render(r);
                r.sql.push_str(" BETWEEN ");
                low.render(r);
                r.sql.push_str(" AND ");
                high.render(r);
            }
            Predicate::Group(clause) => {
                r.sql.push('(');
                clause.render(r);
                r.sql.push(')');
            }
        }
    }
}

impl Render for WhereClause {
    fn render(&self, r: &mut Renderer) {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(match item.conjunction {
                    Conjunction::And => " AND ",
                    Conjunction::Or => " OR ",
                });
            }
            item.predicate.render(r);
        }
    }
}
