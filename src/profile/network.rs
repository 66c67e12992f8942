use serde_json::Value;
use tracing::debug;

use crate::core::JsonMap;
use crate::core::keys::{EDGES, NODES};
use crate::data::{InputData, json_type_name};
use crate::error::{CxError, CxResult};

use super::{DataProfile, ProfileOptions, unsupported_input};

/// Network profile: validates `nodes`/`edges` and passes the mapping through.
///
/// `nodes` is required and every node needs an `id`. `edges` may be absent;
/// when present every edge needs `id1` and `id2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetworkProfile;

impl DataProfile for NetworkProfile {
    fn render(&self, data: &InputData, _options: &ProfileOptions) -> CxResult<JsonMap> {
        let InputData::Keyed(keyed) = data else {
            return Err(unsupported_input("network", data));
        };

        let nodes = required_entries(keyed, NODES)?;
        check_fields(nodes, NODES, &["id"])?;

        let edge_count = match keyed.get(EDGES) {
            None => 0,
            Some(_) => {
                let edges = required_entries(keyed, EDGES)?;
                check_fields(edges, EDGES, &["id1", "id2"])?;
                edges.len()
            }
        };
        debug!(nodes = nodes.len(), edges = edge_count, "validated network data");

        Ok(data.raw_dict_form())
    }
}

fn required_entries<'a>(keyed: &'a JsonMap, key: &str) -> CxResult<&'a [Value]> {
    match keyed.get(key) {
        Some(Value::Array(entries)) => Ok(entries),
        Some(other) => Err(CxError::profile(format!(
            "{key} must be a list of mappings, found {}",
            json_type_name(other)
        ))),
        None => Err(CxError::profile(format!("network data requires {key}"))),
    }
}

pub(super) fn check_fields(entries: &[Value], key: &str, fields: &[&str]) -> CxResult<()> {
    for (index, entry) in entries.iter().enumerate() {
        let Value::Object(entry) = entry else {
            return Err(CxError::profile(format!(
                "{key}[{index}] must be a mapping, found {}",
                json_type_name(entry)
            )));
        };
        if let Some(missing) = fields.iter().find(|field| !entry.contains_key(**field)) {
            return Err(CxError::profile(format!(
                "{key}[{index}] is missing required field {missing}"
            )));
        }
    }
    Ok(())
}
