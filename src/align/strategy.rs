use std::collections::HashSet;

use serde_json::Value;

use crate::core::label::require_label_key;
use crate::core::{DataFrame, JsonMap, label_key, native_scalar};
use crate::error::{CxError, CxResult};

/// One orientation an annotation table may have relative to the target labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentStrategy {
    /// Labels in the first column; each row's remaining cells form one entry.
    FirstColumn,
    /// Labels in the first row; each column's remaining cells form one entry.
    FirstRow,
    /// Labels in the column headers; each column forms one entry.
    Header,
    /// Labels in the row index; each row forms one entry.
    Index,
}

impl AlignmentStrategy {
    /// Evaluation order. The first strategy that matches wins.
    pub const PRIORITY: [Self; 4] = [Self::FirstColumn, Self::FirstRow, Self::Header, Self::Index];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstColumn => "first-column",
            Self::FirstRow => "first-row",
            Self::Header => "header",
            Self::Index => "index",
        }
    }

    /// True when every candidate label of the table is one of `targets`.
    #[must_use]
    pub fn matches(self, table: &DataFrame, targets: &HashSet<String>) -> bool {
        let candidates: Vec<&Value> = match self {
            Self::FirstColumn => table.column(0).unwrap_or_default(),
            Self::FirstRow => table.row(0).map(|row| row.iter().collect()).unwrap_or_default(),
            Self::Header => table.columns().iter().collect(),
            Self::Index => table.index().iter().collect(),
        };
        !candidates.is_empty()
            && candidates
                .iter()
                .all(|label| label_key(label).is_some_and(|key| targets.contains(&key)))
    }

    /// Reshapes the table into `{label: [values...]}`.
    pub fn apply(self, table: &DataFrame) -> CxResult<JsonMap> {
        let mut entries = Entries::default();
        match self {
            Self::FirstColumn => {
                for row in table.rows() {
                    let Some((label, rest)) = row.split_first() else {
                        continue;
                    };
                    entries.push(label, rest.iter())?;
                }
            }
            Self::FirstRow => {
                let rows = table.rows();
                if let Some((first, rest)) = rows.split_first() {
                    for (position, label) in first.iter().enumerate() {
                        entries.push(label, rest.iter().map(|row| &row[position]))?;
                    }
                }
            }
            Self::Header => {
                for (position, label) in table.columns().iter().enumerate() {
                    entries.push(label, table.rows().iter().map(|row| &row[position]))?;
                }
            }
            Self::Index => {
                for (label, row) in table.index().iter().zip(table.rows()) {
                    entries.push(label, row.iter())?;
                }
            }
        }
        Ok(entries.map)
    }
}

#[derive(Default)]
struct Entries {
    map: JsonMap,
}

impl Entries {
    fn push<'a>(&mut self, label: &Value, values: impl Iterator<Item = &'a Value>) -> CxResult<()> {
        let key = require_label_key(label, "annotation label")?;
        if self.map.contains_key(&key) {
            return Err(CxError::invalid_type(format!(
                "annotation label {key:?} appears more than once"
            )));
        }
        let values = values.map(native_scalar).collect();
        self.map.insert(key, Value::Array(values));
        Ok(())
    }
}

/// Result of probing the strategy chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Confident(AlignmentStrategy),
    /// No strategy matched; the index strategy is applied regardless.
    NoConfidentAlignment,
}

impl Alignment {
    #[must_use]
    pub const fn strategy(self) -> AlignmentStrategy {
        match self {
            Self::Confident(strategy) => strategy,
            Self::NoConfidentAlignment => AlignmentStrategy::Index,
        }
    }
}

#[must_use]
pub fn resolve_alignment(table: &DataFrame, targets: &[Value]) -> Alignment {
    let targets: HashSet<String> = targets.iter().filter_map(label_key).collect();
    AlignmentStrategy::PRIORITY
        .into_iter()
        .find(|strategy| strategy.matches(table, &targets))
        .map_or(Alignment::NoConfidentAlignment, Alignment::Confident)
}
