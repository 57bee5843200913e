use crate::{error::WhereError, filter::condition::Condition};
use model::core::value::Value;

/// Field conditions that are AND-ed together, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterGroup {
    pub entries: Vec<(String, Condition)>,
}

impl FilterGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, condition: impl Into<Condition>) -> Self {
        self.entries.push((name.into(), condition.into()));
        self
    }

    /// Shorthand for an equality condition.
    pub fn eq(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.field(name, Condition::Value(value.into()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn from_json(json: &serde_json::Value) -> Result<Self, WhereError> {
        let object = json
            .as_object()
            .ok_or_else(|| WhereError::InvalidGroup(json_kind(json).to_string()))?;

        let entries = object
            .iter()
            .map(|(field, condition)| Ok((field.clone(), Condition::from_json(field, condition)?)))
            .collect::<Result<Vec<_>, WhereError>>()?;
        Ok(Self { entries })
    }

    /// Rewrites every key with `f`, leaving conditions untouched.
    pub fn map_keys(&self, mut f: impl FnMut(&str) -> String) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(field, condition)| (f(field), condition.clone()))
            .collect();
        Self { entries }
    }
}

/// A search filter: one group, or several groups OR-ed together.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Group(FilterGroup),
    AnyOf(Vec<FilterGroup>),
}

impl Default for Filter {
    fn default() -> Self {
        Filter::Group(FilterGroup::default())
    }
}

impl Filter {
    pub fn any_of(groups: impl IntoIterator<Item = FilterGroup>) -> Self {
        Filter::AnyOf(groups.into_iter().collect())
    }

    pub fn groups(&self) -> &[FilterGroup] {
        match self {
            Filter::Group(group) => std::slice::from_ref(group),
            Filter::AnyOf(groups) => groups,
        }
    }

    /// Every field referenced by any group, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.groups().iter().flat_map(FilterGroup::fields)
    }

    pub fn is_empty(&self) -> bool {
        self.groups().iter().all(FilterGroup::is_empty)
    }

    /// Rewrites the field names of every group, keeping the filter's shape.
    pub fn map_fields(&self, mut f: impl FnMut(&str) -> String) -> Self {
        match self {
            Filter::Group(group) => Filter::Group(group.map_keys(&mut f)),
            Filter::AnyOf(groups) => {
                Filter::AnyOf(groups.iter().map(|g| g.map_keys(&mut f)).collect())
            }
        }
    }

    /// `null` is the empty filter, an object is one group and an array is a
    /// list of OR-ed groups.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, WhereError> {
        match json {
            serde_json::Value::Null => Ok(Filter::default()),
            serde_json::Value::Array(items) => items
                .iter()
                .map(FilterGroup::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Filter::AnyOf),
            other => FilterGroup::from_json(other).map(Filter::Group),
        }
    }
}

impl From<FilterGroup> for Filter {
    fn from(group: FilterGroup) -> Self {
        Filter::Group(group)
    }
}

impl From<Vec<FilterGroup>> for Filter {
    fn from(groups: Vec<FilterGroup>) -> Self {
        Filter::AnyOf(groups)
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
