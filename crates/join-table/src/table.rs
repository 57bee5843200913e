//! The join table model: one search builds one statement over the base table
//! and the joins it needs.

use std::{collections::HashSet, fmt, sync::Arc};

use crate::{
    config::{JoinTableConfig, SearchDefaults},
    error::{ConfigError, SearchError},
    executor::Executor,
    field::qualify,
    filter::translate,
    join::{JoinFieldInfo, SearchContext, resolve},
    option::{SearchMode, SearchOption},
};
use model::records::row::Row;
use query_builder::{
    ast::expr::Expr,
    builder::{QueryBuilder, select::SelectBuilder},
    dialect::{Dialect, MySql},
    ident, table_ref,
};
use tracing::{debug, warn};

/// Label of the column a count statement selects.
const COUNT_ALIAS: &str = "count";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutput {
    Rows(Vec<Row>),
    Count(u64),
}

#[derive(Clone)]
pub struct JoinTableModel {
    table: String,
    id_column: String,
    join_info: JoinFieldInfo,
    defaults: SearchDefaults,
    dialect: Arc<dyn Dialect>,
    executor: Arc<dyn Executor>,
}

impl fmt::Debug for JoinTableModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinTableModel")
            .field("table", &self.table)
            .field("id_column", &self.id_column)
            .field("join_info", &self.join_info)
            .field("defaults", &self.defaults)
            .field("dialect", &self.dialect.name())
            .finish()
    }
}

impl JoinTableModel {
    /// Validates `config` and builds a model rendering MySQL statements.
    pub fn new(
        config: JoinTableConfig,
        executor: impl Executor + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let join_info = JoinFieldInfo::build(config.join)?;

        Ok(Self {
            table: config.table,
            id_column: config.id_column,
            join_info,
            defaults: config.defaults,
            dialect: Arc::new(MySql),
            executor: Arc::new(executor),
        })
    }

    pub fn with_dialect(mut self, dialect: impl Dialect + 'static) -> Self {
        self.dialect = Arc::new(dialect);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn defaults(&self) -> &SearchDefaults {
        &self.defaults
    }

    pub fn join_info(&self) -> &JoinFieldInfo {
        &self.join_info
    }

    /// Renders the statement `search` would execute, without executing it.
    pub fn statement(&self, mode: SearchMode, option: &SearchOption) -> String {
        let limit = option
            .limit
            .filter(|&limit| limit > 0)
            .unwrap_or(self.defaults.limit);
        let offset = option.offset.unwrap_or(0);

        // Counting ignores the select list and the ordering.
        let (select, order_by) = match mode {
            SearchMode::Count => (Vec::new(), &[][..]),
            SearchMode::Record if option.select.is_empty() => {
                (self.default_select(), option.order_by.as_slice())
            }
            SearchMode::Record => (option.select.clone(), option.order_by.as_slice()),
        };

        let referenced: HashSet<&str> = select
            .iter()
            .map(String::as_str)
            .chain(option.filter.fields())
            .chain(order_by.iter().map(|o| o.field.as_str()))
            .collect();

        let mut builder = SelectBuilder::new(table_ref!(self.table), Arc::clone(&self.dialect));
        let mut ctx = SearchContext::new(self.table.as_str());
        resolve(&mut builder, &self.join_info, &referenced, &mut ctx);

        let filter = option
            .filter
            .map_fields(|field| qualify(field, &self.join_info, &ctx));
        translate(&mut builder, &filter);

        match mode {
            SearchMode::Count => {
                let id = format!("{}.{}", self.table, self.id_column);
                builder.count(&id, COUNT_ALIAS);
            }
            SearchMode::Record => {
                for order in order_by {
                    let field = qualify(&order.field, &self.join_info, &ctx);
                    builder.order_by(&field, order.direction);
                }

                let columns = select
                    .iter()
                    .map(|field| self.select_expr(field, &ctx))
                    .collect();
                builder.select(columns);
                builder.offset(offset);
                builder.limit(limit);
            }
        }

        builder.to_query()
    }

    /// Runs one search in `mode`.
    pub async fn search(
        &self,
        mode: SearchMode,
        option: &SearchOption,
    ) -> Result<SearchOutput, SearchError> {
        match mode {
            SearchMode::Record => self.records(option).await.map(SearchOutput::Rows),
            SearchMode::Count => self.count_matching(option).await.map(SearchOutput::Count),
        }
    }

    /// Like [`search`](Self::search), with the mode and option given as
    /// untyped input.
    pub async fn search_json(
        &self,
        mode: &str,
        option: &serde_json::Value,
    ) -> Result<SearchOutput, SearchError> {
        let mode = mode.parse::<SearchMode>()?;
        let option = SearchOption::from_json(option)?;
        self.search(mode, &option).await
    }

    pub async fn records(&self, option: &SearchOption) -> Result<Vec<Row>, SearchError> {
        let sql = self.statement(SearchMode::Record, option);
        self.execute(&sql).await
    }

    pub(crate) async fn count_matching(&self, option: &SearchOption) -> Result<u64, SearchError> {
        let sql = self.statement(SearchMode::Count, option);
        let rows = self.execute(&sql).await?;

        let Some(row) = rows.first() else {
            warn!(sql = %sql, "count statement returned no rows");
            return Err(SearchError::MalformedCount("no rows returned".to_string()));
        };
        let value = row.get_value(COUNT_ALIAS);
        value.as_u64().ok_or_else(|| {
            warn!(sql = %sql, value = %value, "count column is not an unsigned integer");
            SearchError::MalformedCount(format!("`{COUNT_ALIAS}` is {value}"))
        })
    }

    async fn execute(&self, sql: &str) -> Result<Vec<Row>, SearchError> {
        debug!(sql, "executing search");
        let rows = self
            .executor
            .execute(sql)
            .await
            .map_err(SearchError::Execute)?;
        debug!(rows = rows.len(), "search returned");
        Ok(rows)
    }

    /// `table.*` followed by every join field, in declaration order.
    fn default_select(&self) -> Vec<String> {
        std::iter::once(format!("{}.*", self.table))
            .chain(self.join_info.aliases().map(str::to_string))
            .collect()
    }

    fn select_expr(&self, field: &str, ctx: &SearchContext) -> Expr {
        if field.contains('*') {
            return ident(field);
        }
        Expr::Alias {
            expr: Box::new(ident(&qualify(field, &self.join_info, ctx))),
            alias: field.to_string(),
        }
    }
}
