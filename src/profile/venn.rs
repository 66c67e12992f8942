use serde_json::Value;
use tracing::debug;

use crate::core::keys::{DATA, LEGEND, VENN};
use crate::core::{DataFrame, JsonMap};
use crate::core::label::require_label_key;
use crate::data::{InputData, json_type_name};
use crate::error::{CxError, CxResult};

use super::{DataProfile, ProfileOptions, unsupported_input};

/// Venn diagram profile producing `{venn: {data, legend}}`.
///
/// A legend set on the profile always wins, then a legend found in the data,
/// then one generated from `ProfileOptions::venn_groups`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VennProfile {
    legend: JsonMap,
}

impl VennProfile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn legend(&self) -> &JsonMap {
        &self.legend
    }

    /// `None` resets the legend.
    pub fn set_legend(&mut self, legend: Option<JsonMap>) {
        self.legend = legend.unwrap_or_default();
    }

    #[must_use]
    pub fn with_legend(mut self, legend: JsonMap) -> Self {
        self.legend = legend;
        self
    }
}

impl DataProfile for VennProfile {
    fn render(&self, data: &InputData, options: &ProfileOptions) -> CxResult<JsonMap> {
        let (counts, data_legend) = match data {
            InputData::Frame(frame) => (counts_from_frame(frame)?, None),
            InputData::Keyed(keyed) => counts_from_keyed(keyed)?,
            other => return Err(unsupported_input("venn", other)),
        };

        let legend = if !self.legend.is_empty() {
            self.legend.clone()
        } else if let Some(legend) = data_legend {
            legend
        } else {
            generated_legend(&counts, options.venn_groups.unwrap_or(0))
        };
        debug!(groups = counts.len(), legend = legend.len(), "rendered venn profile");

        let mut venn = JsonMap::new();
        venn.insert(DATA.to_owned(), Value::Object(counts));
        venn.insert(LEGEND.to_owned(), Value::Object(legend));

        let mut payload = JsonMap::new();
        payload.insert(VENN.to_owned(), Value::Object(venn));
        Ok(payload)
    }
}

/// The first data column holds the counts, keyed by row label.
fn counts_from_frame(frame: &DataFrame) -> CxResult<JsonMap> {
    if frame.row_count() > 0 && frame.column_count() == 0 {
        return Err(CxError::profile(
            "venn frame must have one data column of counts",
        ));
    }
    let mut counts = JsonMap::new();
    for (label, row) in frame.index().iter().zip(frame.rows()) {
        let key = require_label_key(label, "venn group label")?;
        counts.insert(key, row[0].clone());
    }
    Ok(counts)
}

fn counts_from_keyed(keyed: &JsonMap) -> CxResult<(JsonMap, Option<JsonMap>)> {
    let venn = match keyed.get(VENN) {
        Some(Value::Object(venn)) => venn.clone(),
        Some(other) => {
            return Err(CxError::invalid_type(format!(
                "venn must be a mapping, found {}",
                json_type_name(other)
            )));
        }
        None => keyed.clone(),
    };

    let counts = match venn.get(DATA) {
        Some(Value::Object(counts)) => counts.clone(),
        Some(other) => {
            return Err(CxError::profile(format!(
                "venn data must be a mapping of group to count, found {}",
                json_type_name(other)
            )));
        }
        None => return Err(CxError::profile("venn requires a data mapping")),
    };

    let legend = match venn.get(LEGEND) {
        None | Some(Value::Null) => None,
        Some(Value::Object(legend)) => Some(legend.clone()),
        Some(other) => {
            return Err(CxError::profile(format!(
                "venn legend must be a mapping, found {}",
                json_type_name(other)
            )));
        }
    };
    Ok((counts, legend))
}

/// Labels the first `groups` single-character keys `Group 1`, `Group 2`, ...
fn generated_legend(counts: &JsonMap, groups: usize) -> JsonMap {
    counts
        .keys()
        .filter(|key| key.chars().count() == 1)
        .take(groups)
        .enumerate()
        .map(|(i, key)| (key.clone(), Value::String(format!("Group {}", i + 1))))
        .collect()
}
