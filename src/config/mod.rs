//! Chart configuration: typed entries keyed by label.

mod graph_type;
mod value;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::trace;

use crate::core::JsonMap;
use crate::error::{CxError, CxResult};

pub use graph_type::GraphType;
pub use value::{ConfigValue, RgbColor, RgbaColor};

/// Ordered set of config entries, at most one per label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Configs {
    entries: IndexMap<String, ConfigValue>,
}

impl Configs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a config from a JSON mapping, inferring each entry's type.
    pub fn from_json_map(map: JsonMap) -> CxResult<Self> {
        let mut configs = Self::new();
        for (label, value) in map {
            configs.set_param(label, value)?;
        }
        Ok(configs)
    }

    /// Inserts a typed entry, replacing any entry with the same label.
    pub fn add(&mut self, label: impl Into<String>, value: impl Into<ConfigValue>) -> CxResult<&mut Self> {
        let label = checked_label(label.into())?;
        self.entries.insert(label, value.into());
        Ok(self)
    }

    /// Sets `label` from a JSON value, inferring the entry type.
    ///
    /// `graphType` values naming a known chart kind become
    /// [`ConfigValue::GraphType`]. Updating an existing label with a value of
    /// another type is rejected.
    pub fn set_param(&mut self, label: impl Into<String>, value: impl Into<Value>) -> CxResult<&mut Self> {
        let label = checked_label(label.into())?;
        let candidate = match value.into() {
            Value::String(text) if label == GraphType::LABEL => match text.parse::<GraphType>() {
                Ok(graph_type) => ConfigValue::GraphType(graph_type),
                Err(_) => ConfigValue::String(text),
            },
            other => ConfigValue::infer(other)?,
        };

        if let Some(existing) = self.entries.get(&label) {
            if std::mem::discriminant(existing) != std::mem::discriminant(&candidate) {
                return Err(CxError::InvalidConfig(format!(
                    "{label} is already set as {} and cannot take a {} value; remove it first",
                    existing.kind(),
                    candidate.kind()
                )));
            }
        }
        trace!(label = %label, kind = candidate.kind(), "set config param");
        self.entries.insert(label, candidate);
        Ok(self)
    }

    pub fn with_param(mut self, label: impl Into<String>, value: impl Into<Value>) -> CxResult<Self> {
        self.set_param(label, value)?;
        Ok(self)
    }

    #[must_use]
    pub fn get_param(&self, label: &str) -> Option<&ConfigValue> {
        self.entries.get(label)
    }

    pub fn remove(&mut self, label: &str) -> Option<ConfigValue> {
        self.entries.shift_remove(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), value))
    }

    /// The `graphType` entry, when it names a known chart kind.
    #[must_use]
    pub fn graph_type(&self) -> Option<GraphType> {
        match self.entries.get(GraphType::LABEL)? {
            ConfigValue::GraphType(graph_type) => Some(*graph_type),
            ConfigValue::String(text) => text.parse().ok(),
            _ => None,
        }
    }

    /// Non-negative integer entry, e.g. `vennGroups`.
    #[must_use]
    pub fn count_param(&self, label: &str) -> Option<usize> {
        match self.entries.get(label)? {
            ConfigValue::Int(int) => usize::try_from(*int).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn render_to_dict(&self) -> JsonMap {
        self.entries
            .iter()
            .map(|(label, value)| (label.clone(), value.to_json()))
            .collect()
    }

    /// `[[label, value], ...]` in insertion order.
    #[must_use]
    pub fn render_to_list(&self) -> Vec<Value> {
        self.entries
            .iter()
            .map(|(label, value)| Value::Array(vec![Value::String(label.clone()), value.to_json()]))
            .collect()
    }
}

impl Serialize for Configs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.render_to_dict().serialize(serializer)
    }
}

fn checked_label(label: String) -> CxResult<String> {
    if label.trim().is_empty() {
        return Err(CxError::InvalidConfig("config label cannot be empty".to_owned()));
    }
    Ok(label)
}
