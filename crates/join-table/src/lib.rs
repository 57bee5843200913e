//! Treats a base table and the tables reachable from it through declared join
//! paths as one flat, paginated record source.
//!
//! A [`JoinTableModel`](table::JoinTableModel) is declared once from a
//! [`JoinTableConfig`](config::JoinTableConfig). Every search resolves only the
//! joins its filter, select list and ordering actually reference, qualifies the
//! logical field names against the aliases it assigned, and hands the rendered
//! statement to an [`Executor`](executor::Executor).

pub mod config;
pub mod error;
pub mod executor;
pub mod field;
pub mod filter;
pub mod join;
pub mod option;
pub mod pagination;
pub mod table;

#[cfg(test)]
mod tests;

pub use config::{JoinTableConfig, SearchDefaults};
pub use error::{ConfigError, ExecuteError, SearchError, WhereError};
pub use executor::Executor;
pub use filter::{Condition, Filter, FilterGroup, OpCondition, Operator};
pub use join::{Hop, JoinSpec};
pub use option::{CountOption, OrderBy, SearchMode, SearchOption};
pub use table::{JoinTableModel, SearchOutput};
