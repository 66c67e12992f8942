//! Profile strategies turning wrapped input into the canonical payload.
//!
//! Each strategy implements [`DataProfile`]; [`Profile`] is the closed set a
//! [`crate::data::WrappedData`] can carry.

mod genome;
mod network;
mod raw;
mod standard;
mod venn;

use serde::{Deserialize, Serialize};

use crate::core::JsonMap;
use crate::data::InputData;
use crate::error::{CxError, CxResult};

pub use genome::GenomeProfile;
pub use network::NetworkProfile;
pub use raw::RawProfile;
pub use standard::StandardProfile;
pub use venn::VennProfile;

/// Contract implemented by every profile strategy.
///
/// Rendering never mutates the input; a profile only reads its own label
/// state and the supplied options.
pub trait DataProfile {
    fn render(&self, data: &InputData, options: &ProfileOptions) -> CxResult<JsonMap>;
}

/// Per-render options.
///
/// The default is lenient: no count checks are made and no Venn legend is
/// generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileOptions {
    /// `y.data` row count must equal `y.vars` length.
    #[serde(default)]
    pub match_vars_to_rows: bool,
    /// First-row column count must equal `y.smps` length.
    #[serde(default)]
    pub match_smps_to_cols: bool,
    /// Every `x` list must be as long as `y.smps`.
    #[serde(default)]
    pub match_x_to_smps: bool,
    /// Every `z` list must be as long as `y.vars`.
    #[serde(default)]
    pub match_z_to_vars: bool,
    /// Number of Venn groups used to generate a default legend.
    #[serde(default)]
    pub venn_groups: Option<usize>,
}

impl ProfileOptions {
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            match_vars_to_rows: true,
            match_smps_to_cols: true,
            match_x_to_smps: true,
            match_z_to_vars: true,
            venn_groups: None,
        }
    }

    #[must_use]
    pub const fn with_match_vars_to_rows(mut self, enabled: bool) -> Self {
        self.match_vars_to_rows = enabled;
        self
    }

    #[must_use]
    pub const fn with_match_smps_to_cols(mut self, enabled: bool) -> Self {
        self.match_smps_to_cols = enabled;
        self
    }

    #[must_use]
    pub const fn with_venn_groups(mut self, groups: Option<usize>) -> Self {
        self.venn_groups = groups;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    Standard(StandardProfile),
    Raw(RawProfile),
    Venn(VennProfile),
    Network(NetworkProfile),
    Genome(GenomeProfile),
}

impl Profile {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard(_) => "standard",
            Self::Raw(_) => "raw",
            Self::Venn(_) => "venn",
            Self::Network(_) => "network",
            Self::Genome(_) => "genome",
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::Standard(StandardProfile::default())
    }
}

impl DataProfile for Profile {
    fn render(&self, data: &InputData, options: &ProfileOptions) -> CxResult<JsonMap> {
        match self {
            Self::Standard(profile) => profile.render(data, options),
            Self::Raw(profile) => profile.render(data, options),
            Self::Venn(profile) => profile.render(data, options),
            Self::Network(profile) => profile.render(data, options),
            Self::Genome(profile) => profile.render(data, options),
        }
    }
}

impl From<StandardProfile> for Profile {
    fn from(value: StandardProfile) -> Self {
        Self::Standard(value)
    }
}

impl From<RawProfile> for Profile {
    fn from(value: RawProfile) -> Self {
        Self::Raw(value)
    }
}

impl From<VennProfile> for Profile {
    fn from(value: VennProfile) -> Self {
        Self::Venn(value)
    }
}

impl From<NetworkProfile> for Profile {
    fn from(value: NetworkProfile) -> Self {
        Self::Network(value)
    }
}

impl From<GenomeProfile> for Profile {
    fn from(value: GenomeProfile) -> Self {
        Self::Genome(value)
    }
}

fn unsupported_input(profile: &str, data: &InputData) -> CxError {
    CxError::invalid_type(format!(
        "{profile} profile cannot render {} data",
        data.kind()
    ))
}
