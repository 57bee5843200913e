use std::future::Future;

use async_trait::async_trait;
use model::records::row::Row;

use crate::error::ExecuteError;

/// Runs one rendered SQL statement and returns the resulting rows.
///
/// A count statement is expected to return a single row with a `count` field.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<Vec<Row>, ExecuteError>;
}

#[async_trait]
impl<F, Fut> Executor for F
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<Row>, ExecuteError>> + Send + 'static,
{
    async fn execute(&self, sql: &str) -> Result<Vec<Row>, ExecuteError> {
        (self)(sql.to_string()).await
    }
}
