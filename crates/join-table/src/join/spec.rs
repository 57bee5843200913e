//! Declared join paths and the logical fields they expose.

use std::{collections::HashMap, fmt};

use crate::error::ConfigError;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

/// One step of a join path: `LEFT JOIN table ON <current>.left_field = table.right_field`.
///
/// Written as a `[table, left_field, right_field]` triple in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct Hop {
    pub table: String,
    pub left_field: String,
    pub right_field: String,
}

impl Hop {
    pub fn new(
        table: impl Into<String>,
        left_field: impl Into<String>,
        right_field: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            left_field: left_field.into(),
            right_field: right_field.into(),
        }
    }
}

impl From<(String, String, String)> for Hop {
    fn from((table, left_field, right_field): (String, String, String)) -> Self {
        Self {
            table,
            left_field,
            right_field,
        }
    }
}

impl From<Hop> for (String, String, String) {
    fn from(hop: Hop) -> Self {
        (hop.table, hop.left_field, hop.right_field)
    }
}

/// A join path from the base table plus the columns of its last table that are
/// exposed as logical fields, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinSpec {
    pub path: Vec<Hop>,
    #[serde(
        serialize_with = "serialize_select",
        deserialize_with = "deserialize_select"
    )]
    pub select: Vec<(String, String)>,
}

impl JoinSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hop(
        mut self,
        table: impl Into<String>,
        left_field: impl Into<String>,
        right_field: impl Into<String>,
    ) -> Self {
        self.path.push(Hop::new(table, left_field, right_field));
        self
    }

    /// Exposes `column` of the path's last table as the logical field `alias`.
    pub fn field(mut self, alias: impl Into<String>, column: impl Into<String>) -> Self {
        self.select.push((alias.into(), column.into()));
        self
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.select.iter().map(|(alias, _)| alias.as_str())
    }
}

fn serialize_select<S: Serializer>(
    select: &[(String, String)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(select.len()))?;
    for (alias, column) in select {
        map.serialize_entry(alias, column)?;
    }
    map.end()
}

fn deserialize_select<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<(String, String)>, D::Error> {
    struct OrderedPairs;

    impl<'de> Visitor<'de> for OrderedPairs {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of logical field name to column name")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((alias, column)) = access.next_entry::<String, String>()? {
                pairs.push((alias, column));
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(OrderedPairs)
}

/// A logical field exposed by a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinField {
    pub alias: String,
    pub column: String,
    /// Index of the declaring spec.
    pub join: usize,
}

/// How a logical field maps onto the joined tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinFieldLookup<'a> {
    Joined { column: &'a str, path: &'a [Hop] },
    Base,
}

/// Validated join declarations with a lookup from logical field to column.
/// Built once per model and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct JoinFieldInfo {
    specs: Vec<JoinSpec>,
    fields: Vec<JoinField>,
    index: HashMap<String, usize>,
}

impl JoinFieldInfo {
    pub fn build(specs: Vec<JoinSpec>) -> Result<Self, ConfigError> {
        let mut fields = Vec::new();
        let mut index = HashMap::new();

        for (join, spec) in specs.iter().enumerate() {
            if spec.path.is_empty() {
                return Err(ConfigError::EmptyPath(join));
            }
            for (hop_index, hop) in spec.path.iter().enumerate() {
                let empty_part = [
                    ("table", &hop.table),
                    ("left field", &hop.left_field),
                    ("right field", &hop.right_field),
                ]
                .into_iter()
                .find(|(_, value)| value.is_empty());

                if let Some((part, _)) = empty_part {
                    return Err(ConfigError::EmptyHopPart {
                        join,
                        hop: hop_index,
                        part,
                    });
                }
            }
            if spec.select.is_empty() {
                return Err(ConfigError::EmptySelect(join));
            }

            for (alias, column) in &spec.select {
                if alias.is_empty() || alias.contains('.') {
                    return Err(ConfigError::QualifiedField(alias.clone()));
                }
                if column.is_empty() {
                    return Err(ConfigError::EmptyColumn(alias.clone()));
                }
                if index.insert(alias.clone(), fields.len()).is_some() {
                    return Err(ConfigError::DuplicateField(alias.clone()));
                }
                fields.push(JoinField {
                    alias: alias.clone(),
                    column: column.clone(),
                    join,
                });
            }
        }

        Ok(Self {
            specs,
            fields,
            index,
        })
    }

    pub fn specs(&self) -> &[JoinSpec] {
        &self.specs
    }

    pub fn lookup(&self, field: &str) -> JoinFieldLookup<'_> {
        match self.index.get(field).map(|&i| &self.fields[i]) {
            Some(f) => JoinFieldLookup::Joined {
                column: &f.column,
                path: &self.specs[f.join].path,
            },
            None => JoinFieldLookup::Base,
        }
    }

    /// All logical join fields in declaration order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.alias.as_str())
    }
}
