mod pagination;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use model::records::row::Row;
use serde_json::json;

use crate::{
    config::{JoinTableConfig, SearchDefaults},
    error::ExecuteError,
    executor::Executor,
    join::JoinSpec,
    table::JoinTableModel,
};

/// Serves a fixed table from memory and records every statement it runs.
///
/// Record statements are answered by slicing the rows with the statement's
/// `LIMIT`/`OFFSET`; the filter is not evaluated. Count statements return the
/// number of rows.
#[derive(Clone, Default)]
pub(crate) struct MemoryExecutor {
    rows: Arc<Vec<Row>>,
    statements: Arc<Mutex<Vec<String>>>,
    fail_with: Option<&'static str>,
}

impl MemoryExecutor {
    pub(crate) fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows: Arc::new(rows),
            ..Default::default()
        }
    }

    pub(crate) fn failing(message: &'static str) -> Self {
        Self {
            fail_with: Some(message),
            ..Default::default()
        }
    }

    pub(crate) fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for MemoryExecutor {
    async fn execute(&self, sql: &str) -> Result<Vec<Row>, ExecuteError> {
        self.statements.lock().unwrap().push(sql.to_string());

        if let Some(message) = self.fail_with {
            return Err(message.into());
        }
        if sql.starts_with("SELECT COUNT(") {
            let row = Row::from_json(&json!({ "count": self.rows.len() })).unwrap();
            return Ok(vec![row]);
        }

        let limit = token_after(sql, "LIMIT").unwrap_or(self.rows.len());
        let offset = token_after(sql, "OFFSET").unwrap_or(0);
        Ok(self.rows.iter().skip(offset).take(limit).cloned().collect())
    }
}

fn token_after(sql: &str, keyword: &str) -> Option<usize> {
    let mut tokens = sql.split_whitespace();
    tokens.find(|t| *t == keyword)?;
    tokens.next()?.parse().ok()
}

/// `{id, nickname}` rows with ids `1..=n`.
pub(crate) fn users(n: i64) -> Vec<Row> {
    (1..=n)
        .map(|id| Row::from_json(&json!({"id": id, "nickname": format!("user{id}")})).unwrap())
        .collect()
}

pub(crate) fn phone_join() -> JoinSpec {
    JoinSpec::new()
        .hop("phone", "id", "user_id")
        .field("user_phone", "phone")
}

pub(crate) fn user_model(executor: MemoryExecutor) -> JoinTableModel {
    JoinTableModel::new(JoinTableConfig::new("user").join(phone_join()), executor).unwrap()
}

/// A model without joins fetching pages of `page_size` rows.
pub(crate) fn paged_model(executor: MemoryExecutor, page_size: usize) -> JoinTableModel {
    let defaults = SearchDefaults {
        page_size,
        ..Default::default()
    };
    JoinTableModel::new(JoinTableConfig::new("user").defaults(defaults), executor).unwrap()
}
