//! Search request options and their JSON form.

use std::{fmt, str::FromStr};

use crate::{error::SearchError, filter::Filter};
use query_builder::ast::common::OrderDir;

/// What a search returns: a row count or the matching records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Count,
    Record,
}

impl FromStr for SearchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" => Ok(SearchMode::Count),
            "record" => Ok(SearchMode::Record),
            other => Err(SearchError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Count => f.write_str("count"),
            SearchMode::Record => f.write_str("record"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: OrderDir,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: OrderDir::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: OrderDir::Desc,
        }
    }

    /// Accepts `["field", "asc" | "desc"]`, direction case-insensitive, or a
    /// bare `"field"` for ascending order.
    fn from_json(json: &serde_json::Value) -> Result<Self, SearchError> {
        match json {
            serde_json::Value::String(field) => Ok(OrderBy::asc(field.as_str())),
            serde_json::Value::Array(pair) => match pair.as_slice() {
                [serde_json::Value::String(field), serde_json::Value::String(dir)] => {
                    let direction = dir
                        .parse::<OrderDir>()
                        .map_err(|e| SearchError::InvalidOption(e.to_string()))?;
                    Ok(OrderBy {
                        field: field.clone(),
                        direction,
                    })
                }
                _ => Err(invalid("`orderBy` entries must be [field, direction] pairs")),
            },
            _ => Err(invalid("`orderBy` entries must be [field, direction] pairs")),
        }
    }
}

/// Options of one search. Unset `offset` and `limit` fall back to the model's
/// defaults; an empty `select` selects every base column and every join field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOption {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub select: Vec<String>,
    pub filter: Filter,
    pub order_by: Vec<OrderBy>,
}

impl SearchOption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by.push(order);
        self
    }

    /// Reads `{offset, limit, select, where, orderBy}`; every key is optional
    /// and `null` counts as absent.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, SearchError> {
        let object = json
            .as_object()
            .ok_or_else(|| invalid("search option must be an object"))?;

        let mut option = SearchOption::default();
        for (key, value) in object {
            if value.is_null() {
                continue;
            }
            match key.as_str() {
                "offset" => option.offset = Some(non_negative(key, value)?),
                "limit" => option.limit = Some(non_negative(key, value)?),
                "select" => option.select = string_list(key, value)?,
                "where" => option.filter = Filter::from_json(value)?,
                "orderBy" => {
                    let entries = value
                        .as_array()
                        .ok_or_else(|| invalid("`orderBy` must be an array"))?;
                    option.order_by = entries
                        .iter()
                        .map(OrderBy::from_json)
                        .collect::<Result<Vec<_>, _>>()?;
                }
                other => return Err(invalid(&format!("unknown key `{other}`"))),
            }
        }
        Ok(option)
    }
}

/// Options of a count: only the filter and limit apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountOption {
    pub filter: Filter,
    pub limit: Option<usize>,
}

impl CountOption {
    pub fn new(filter: impl Into<Filter>) -> Self {
        Self {
            filter: filter.into(),
            limit: None,
        }
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self, SearchError> {
        let object = json
            .as_object()
            .ok_or_else(|| invalid("count option must be an object"))?;

        let mut option = CountOption::default();
        for (key, value) in object {
            if value.is_null() {
                continue;
            }
            match key.as_str() {
                "where" => option.filter = Filter::from_json(value)?,
                "limit" => option.limit = Some(non_negative(key, value)?),
                other => return Err(invalid(&format!("unknown key `{other}`"))),
            }
        }
        Ok(option)
    }
}

impl From<CountOption> for SearchOption {
    fn from(option: CountOption) -> Self {
        SearchOption {
            limit: option.limit,
            filter: option.filter,
            ..Default::default()
        }
    }
}

fn invalid(reason: &str) -> SearchError {
    SearchError::InvalidOption(reason.to_string())
}

fn non_negative(key: &str, value: &serde_json::Value) -> Result<usize, SearchError> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| invalid(&format!("`{key}` must be a non-negative integer")))
}

fn string_list(key: &str, value: &serde_json::Value) -> Result<Vec<String>, SearchError> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid(&format!("`{key}` must be an array of strings")))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(&format!("`{key}` must be an array of strings")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::WhereError, filter::FilterGroup};
    use serde_json::json;

    #[test]
    fn test_search_mode_parsing() {
        assert_eq!("count".parse::<SearchMode>().unwrap(), SearchMode::Count);
        assert_eq!("record".parse::<SearchMode>().unwrap(), SearchMode::Record);
        assert!(matches!(
            "records".parse::<SearchMode>(),
            Err(SearchError::InvalidMode(mode)) if mode == "records"
        ));
    }

    #[test]
    fn test_option_from_json() {
        let option = SearchOption::from_json(&json!({
            "offset": 10,
            "limit": 20,
            "select": ["id", "user_phone"],
            "where": {"id": 1},
            "orderBy": [["id", "DESC"], "nickname"]
        }))
        .unwrap();

        assert_eq!(
            option,
            SearchOption::new()
                .offset(10)
                .limit(20)
                .select(["id", "user_phone"])
                .filter(FilterGroup::new().eq("id", 1))
                .order_by(OrderBy::desc("id"))
                .order_by(OrderBy::asc("nickname"))
        );
    }

    #[test]
    fn test_option_rejects_malformed_input() {
        assert!(matches!(
            SearchOption::from_json(&json!([])),
            Err(SearchError::InvalidOption(_))
        ));
        assert!(matches!(
            SearchOption::from_json(&json!({"limit": -1})),
            Err(SearchError::InvalidOption(_))
        ));
        assert!(matches!(
            SearchOption::from_json(&json!({"orderBy": [["id", "sideways"]]})),
            Err(SearchError::InvalidOption(_))
        ));
        assert!(matches!(
            SearchOption::from_json(&json!({"sort": []})),
            Err(SearchError::InvalidOption(_))
        ));
        assert!(matches!(
            SearchOption::from_json(&json!({"where": {"id": {"$regex": "x"}}})),
            Err(SearchError::Where(WhereError::InvalidOperator(op))) if op == "$regex"
        ));
    }

    #[test]
    fn test_count_option_converts() {
        let count = CountOption::from_json(&json!({"where": [{"id": 1}, {"id": 2}], "limit": 5})).unwrap();
        let option = SearchOption::from(count);
        assert_eq!(option.limit, Some(5));
        assert_eq!(option.filter.groups().len(), 2);
        assert!(option.select.is_empty());
    }
}
