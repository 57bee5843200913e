use crate::{error::ConfigError, join::JoinSpec};
use serde::{Deserialize, Serialize};

/// Declaration of a join table model.
///
/// ```toml
/// table = "user"
///
/// [[join]]
/// path = [["phone", "id", "user_id"]]
/// select = { user_phone = "phone" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinTableConfig {
    pub table: String,
    #[serde(default = "default_id_column")]
    pub id_column: String,
    #[serde(default)]
    pub join: Vec<JoinSpec>,
    #[serde(default)]
    pub defaults: SearchDefaults,
}

/// Fallbacks applied to every search and pagination helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    /// Row limit when a search does not set one.
    pub limit: usize,
    /// Upper bound of rows fetched per round trip by `for_each` and `map`.
    pub page_size: usize,
    /// Largest page `find` reads before giving up.
    pub find_limit_max: usize,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            limit: 1000,
            page_size: 1000,
            find_limit_max: 1024,
        }
    }
}

fn default_id_column() -> String {
    "id".to_string()
}

impl JoinTableConfig {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            id_column: default_id_column(),
            join: Vec::new(),
            defaults: SearchDefaults::default(),
        }
    }

    pub fn id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = id_column.into();
        self
    }

    pub fn join(mut self, spec: JoinSpec) -> Self {
        self.join.push(spec);
        self
    }

    pub fn defaults(mut self, defaults: SearchDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Checks the base table settings. Join declarations are checked when the
    /// field lookup is built from them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        if self.id_column.is_empty() {
            return Err(ConfigError::EmptyIdColumn);
        }
        if self.defaults.limit == 0 {
            return Err(ConfigError::InvalidDefault("limit"));
        }
        if self.defaults.page_size == 0 {
            return Err(ConfigError::InvalidDefault("page_size"));
        }
        if self.defaults.find_limit_max == 0 {
            return Err(ConfigError::InvalidDefault("find_limit_max"));
        }
        Ok(())
    }
}
