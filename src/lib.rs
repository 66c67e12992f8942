//! cxpress: data marshalling for CanvasXpress charts.
//!
//! Heterogeneous inputs (JSON mappings, labelled tables, delimited text, free
//! text, URLs) are wrapped, reshaped by a chart-specific profile into the
//! canonical `{y, x, z}` payload, and assembled with config and events into
//! the HTML fragments a page embeds.

pub mod align;
pub mod chart;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod events;
pub mod profile;
pub mod telemetry;
pub mod template;

pub use align::merge_frames_into_xyz;
pub use chart::{Chart, HtmlParts};
pub use config::{ConfigValue, Configs, GraphType};
pub use crate::core::{DataFrame, Delimiter, JsonMap};
pub use data::{InputData, UrlData, WrappedData};
pub use error::{AnnotationAxis, CxError, CxResult};
pub use events::{Event, Events};
pub use profile::{
    DataProfile, GenomeProfile, NetworkProfile, Profile, ProfileOptions, RawProfile,
    StandardProfile, VennProfile,
};
