//! Defines the `Dialect` trait for database-specific SQL syntax.

use model::core::value::Value;

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect. The `*` wildcard is never quoted.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?`
    fn get_placeholder(&self, index: usize) -> String;

    /// Renders a value as an inline SQL literal, escaped for this dialect.
    fn render_literal(&self, value: &Value) -> String;

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        if ident == "*" {
            return ident.to_string();
        }
        format!(r#""{}""#, ident.replace('"', r#""""#))
    }

    fn get_placeholder(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn render_literal(&self, value: &Value) -> String {
        match value {
            Value::Boolean(true) => "TRUE".into(),
            Value::Boolean(false) => "FALSE".into(),
            // Display already doubles single quotes, which is what Postgres expects.
            other => other.to_string(),
        }
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        if ident == "*" {
            return ident.to_string();
        }
        format!("`{}`", ident.replace('`', "``"))
    }

    fn get_placeholder(&self, _index: usize) -> String {
        // MySQL uses ?
        "?".into()
    }

    fn render_literal(&self, value: &Value) -> String {
        match value {
            Value::Int(v) => v.to_string(),
            Value::Uint(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Boolean(v) => v.to_string(),
            Value::String(s) => mysql_quote(s),
            Value::Json(v) => mysql_quote(&v.to_string()),
            Value::Uuid(v) => mysql_quote(&v.to_string()),
            Value::Date(v) => format!("'{v}'"),
            Value::Timestamp(v) => format!("'{}'", v.format("%Y-%m-%d %H:%M:%S%.3f")),
            Value::Null => "NULL".into(),
        }
    }

    fn name(&self) -> String {
        "MySQL".into()
    }
}

/// Quotes a string literal using MySQL's backslash escapes.
fn mysql_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\0' => out.push_str(r"\0"),
            '\x08' => out.push_str(r"\b"),
            '\t' => out.push_str(r"\t"),
            '\x1a' => out.push_str(r"\Z"),
            '\n' => out.push_str(r"\n"),
            '\r' => out.push_str(r"\r"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str(r"\'"),
            '\\' => out.push_str(r"\\"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_quote_identifier() {
        assert_eq!(MySql.quote_identifier("user"), "`user`");
        assert_eq!(MySql.quote_identifier("we`ird"), "`we``ird`");
        assert_eq!(MySql.quote_identifier("*"), "*");
        assert_eq!(Postgres.quote_identifier("user"), r#""user""#);
        assert_eq!(Postgres.quote_identifier("*"), "*");
    }

    #[test]
    fn test_mysql_literals() {
        assert_eq!(MySql.render_literal(&Value::Int(1)), "1");
        assert_eq!(MySql.render_literal(&Value::Boolean(true)), "true");
        assert_eq!(MySql.render_literal(&Value::Null), "NULL");
        assert_eq!(
            MySql.render_literal(&Value::String("it's a \\ test".into())),
            r"'it\'s a \\ test'"
        );
        assert_eq!(
            MySql.render_literal(&Value::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())),
            "'2024-03-01'"
        );
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(
            MySql.render_literal(&Value::Timestamp(ts)),
            "'2024-03-01 12:30:00.000'"
        );
    }

    #[test]
    fn test_postgres_literals() {
        assert_eq!(
            Postgres.render_literal(&Value::String("it's".into())),
            "'it''s'"
        );
        assert_eq!(Postgres.render_literal(&Value::Boolean(false)), "FALSE");
        assert_eq!(Postgres.get_placeholder(0), "$1");
    }
}
