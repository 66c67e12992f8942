use serde_json::Value;
use tracing::debug;

use crate::core::JsonMap;
use crate::core::keys::{DATA, TRACKS};
use crate::data::{InputData, json_type_name};
use crate::error::{CxError, CxResult};

use super::network::check_fields;
use super::{DataProfile, ProfileOptions, unsupported_input};

/// Genome profile: validates the `tracks` list and passes the mapping through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenomeProfile;

impl DataProfile for GenomeProfile {
    fn render(&self, data: &InputData, _options: &ProfileOptions) -> CxResult<JsonMap> {
        let InputData::Keyed(keyed) = data else {
            return Err(unsupported_input("genome", data));
        };

        let tracks = match keyed.get(TRACKS) {
            Some(Value::Array(tracks)) => tracks,
            Some(other) => {
                return Err(CxError::profile(format!(
                    "tracks must be a list of track mappings, found {}",
                    json_type_name(other)
                )));
            }
            None => return Err(CxError::profile("genome data requires tracks")),
        };

        check_fields(tracks, TRACKS, &["type", DATA])?;
        for (index, track) in tracks.iter().enumerate() {
            if !track["type"].is_string() {
                return Err(CxError::profile(format!(
                    "tracks[{index}].type must be a string"
                )));
            }
            if !track[DATA].is_array() {
                return Err(CxError::profile(format!(
                    "tracks[{index}].data must be a list of features"
                )));
            }
        }
        debug!(tracks = tracks.len(), "validated genome data");

        Ok(data.raw_dict_form())
    }
}
