use thiserror::Error;

/// Error type an [`Executor`](crate::executor::Executor) reports. It is passed
/// through to the caller untouched.
pub type ExecuteError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while turning untyped filter input into conditions.
#[derive(Debug, Error, PartialEq)]
pub enum WhereError {
    #[error("invalid condition operator `{0}`")]
    InvalidOperator(String),

    #[error("invalid operand for `{operator}`: {reason}")]
    InvalidOperand { operator: String, reason: String },

    #[error("invalid condition for field `{field}`: {reason}")]
    InvalidCondition { field: String, reason: String },

    #[error("filter group must be an object, got {0}")]
    InvalidGroup(String),
}

/// Errors in a model's declaration, reported once at construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("base table name is empty")]
    EmptyTable,

    #[error("id column name is empty")]
    EmptyIdColumn,

    #[error("join #{0} has an empty path")]
    EmptyPath(usize),

    #[error("join #{join} hop #{hop} has an empty {part}")]
    EmptyHopPart {
        join: usize,
        hop: usize,
        part: &'static str,
    },

    #[error("join #{0} does not select any field")]
    EmptySelect(usize),

    #[error("join field `{0}` is declared more than once")]
    DuplicateField(String),

    #[error("join field `{0}` must be a bare name, not a qualified reference")]
    QualifiedField(String),

    #[error("join field `{0}` maps to an empty column")]
    EmptyColumn(String),

    #[error("search default `{0}` must be greater than zero")]
    InvalidDefault(&'static str),

    #[error("JSON configuration error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML configuration error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// All errors a search, or a helper built on it, can return.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search mode `{0}`, expected `count` or `record`")]
    InvalidMode(String),

    #[error("invalid search option: {0}")]
    InvalidOption(String),

    #[error(transparent)]
    Where(#[from] WhereError),

    #[error("executor error: {0}")]
    Execute(#[source] ExecuteError),

    #[error("malformed count result: {0}")]
    MalformedCount(String),
}
