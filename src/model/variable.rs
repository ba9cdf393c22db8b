use crate::error::{LogError, LogResult};
use crate::schema::{parse_number, NameMapSchema};
use crate::table::LogTable;
use serde::Serialize;
use std::collections::HashMap;

/// Identifier → variable name table from the property name map log.
#[derive(Debug, Clone, Default)]
pub struct NameMap {
    names: HashMap<String, String>,
}

impl NameMap {
    pub fn from_table(table: &LogTable) -> LogResult<Self> {
        let schema = NameMapSchema::resolve(table)?;
        let names = table
            .rows()
            .iter()
            .map(|row| (row[schema.id].clone(), row[schema.name].clone()))
            .collect();
        Ok(Self { names })
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NameMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        Self {
            names: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    id: String,
    name: String,
    value: f64,
}

impl Variable {
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
        }
    }

    /// Resolves `id` through the name map and parses `raw` as a float.
    pub fn decode(id: &str, raw: &str, names: &NameMap) -> LogResult<Self> {
        let name = names
            .name(id)
            .ok_or_else(|| LogError::UnresolvedIdentifier(id.to_string()))?;
        let value = parse_number(raw, id)?;
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            value,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}
