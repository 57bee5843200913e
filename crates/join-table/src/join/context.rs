use std::collections::HashMap;

use tracing::trace;

/// Identifies one hop taken from one table alias, so that identical prefixes
/// of different join paths share the same joined alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HopKey {
    pub left_alias: String,
    pub left_field: String,
    pub right_table: String,
    pub right_field: String,
}

/// Bookkeeping for a single search. Built fresh for every statement.
#[derive(Debug, Clone)]
pub struct SearchContext {
    base_table: String,
    alias_counts: HashMap<String, usize>,
    joins: HashMap<HopKey, String>,
    field_tables: HashMap<String, String>,
}

impl SearchContext {
    /// The base table counts as the first occurrence of its own name.
    pub fn new(base_table: impl Into<String>) -> Self {
        let base_table = base_table.into();
        let alias_counts = HashMap::from([(base_table.clone(), 1)]);
        Self {
            base_table,
            alias_counts,
            joins: HashMap::new(),
            field_tables: HashMap::new(),
        }
    }

    pub fn base_table(&self) -> &str {
        &self.base_table
    }

    /// The alias already assigned to `key`, if this hop was joined before.
    pub fn joined_alias(&self, key: &HopKey) -> Option<&str> {
        self.joins.get(key).map(String::as_str)
    }

    /// Assigns the next alias for `table`: the bare name the first time,
    /// `table2`, `table3`, ... afterwards.
    pub fn next_alias(&mut self, table: &str) -> String {
        let count = self.alias_counts.entry(table.to_string()).or_insert(0);
        *count += 1;
        let alias = if *count == 1 {
            table.to_string()
        } else {
            format!("{table}{count}")
        };
        trace!(table, alias = %alias, "assigned table alias");
        alias
    }

    pub fn record_join(&mut self, key: HopKey, alias: String) {
        self.joins.insert(key, alias);
    }

    pub fn join_count(&self) -> usize {
        self.joins.len()
    }

    pub fn assign_field(&mut self, field: &str, alias: &str) {
        self.field_tables
            .insert(field.to_string(), alias.to_string());
    }

    /// The alias a logical field reads from, or `None` for base table fields.
    pub fn field_table(&self, field: &str) -> Option<&str> {
        self.field_tables.get(field).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_counting_starts_after_base() {
        let mut ctx = SearchContext::new("user");
        assert_eq!(ctx.next_alias("phone"), "phone");
        assert_eq!(ctx.next_alias("phone"), "phone2");
        assert_eq!(ctx.next_alias("user"), "user2");
        assert_eq!(ctx.next_alias("phone"), "phone3");
    }

    #[test]
    fn test_field_tables() {
        let mut ctx = SearchContext::new("user");
        ctx.assign_field("user_phone", "phone2");
        assert_eq!(ctx.field_table("user_phone"), Some("phone2"));
        assert_eq!(ctx.field_table("id"), None);
        assert_eq!(ctx.base_table(), "user");
    }
}
