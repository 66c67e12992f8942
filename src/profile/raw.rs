use crate::core::JsonMap;
use crate::data::InputData;
use crate::error::CxResult;

use super::{DataProfile, ProfileOptions};

/// Passes the raw dict form through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawProfile;

impl DataProfile for RawProfile {
    fn render(&self, data: &InputData, _options: &ProfileOptions) -> CxResult<JsonMap> {
        Ok(data.raw_dict_form())
    }
}
