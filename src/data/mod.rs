//! Input data wrappers.
//!
//! Every accepted source (mapping, table, delimited text, free text, URL) is
//! one variant of [`InputData`]. [`WrappedData`] pairs an input with at most
//! one [`Profile`] and exposes the raw dict view and the canonical view.

mod detect;
pub mod url;

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::core::keys::RAW;
use crate::core::{DataFrame, JsonMap};
use crate::error::{CxError, CxResult};
use crate::profile::{DataProfile, Profile, ProfileOptions};

pub use detect::{TextShape, classify_text};
pub use url::{UrlComponents, UrlData};

/// Discriminant of [`InputData`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Keyed,
    Frame,
    Text,
    Url,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Keyed => "keyed",
            Self::Frame => "frame",
            Self::Text => "text",
            Self::Url => "url",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputData {
    /// A JSON mapping, passed through structurally.
    Keyed(JsonMap),
    /// A labelled table.
    Frame(DataFrame),
    /// Free text handed to the charting library untouched.
    Text(String),
    /// A location the charting library fetches itself.
    Url(UrlData),
}

impl Default for InputData {
    fn default() -> Self {
        Self::Keyed(JsonMap::new())
    }
}

impl From<DataFrame> for InputData {
    fn from(value: DataFrame) -> Self {
        Self::Frame(value)
    }
}

impl From<JsonMap> for InputData {
    fn from(value: JsonMap) -> Self {
        Self::Keyed(value)
    }
}

impl From<UrlData> for InputData {
    fn from(value: UrlData) -> Self {
        Self::Url(value)
    }
}

impl TryFrom<Value> for InputData {
    type Error = CxError;

    fn try_from(value: Value) -> CxResult<Self> {
        Self::keyed(value)
    }
}

impl InputData {
    /// Keyed data from a JSON value. Only objects are accepted.
    pub fn keyed(value: Value) -> CxResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::Keyed(map)),
            other => Err(CxError::invalid_type(format!(
                "keyed data must be a mapping, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Keyed data from JSON text. The text must decode to an object.
    pub fn from_json_str(text: &str) -> CxResult<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            CxError::invalid_type(format!("value must be JSON or compatible: {e}"))
        })?;
        Self::keyed(value)
    }

    pub fn url(url: impl Into<String>) -> CxResult<Self> {
        UrlData::new(url).map(Self::Url)
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Classifies a string and wraps it in the matching variant.
    ///
    /// JSON objects become keyed data, delimited text becomes a frame with a
    /// positional index, everything else (including other JSON and delimited
    /// text that does not parse as a table) stays text.
    pub fn from_text(text: &str) -> CxResult<Self> {
        let shape = classify_text(text);
        let input = match shape {
            TextShape::Json(Value::Object(map)) => Self::Keyed(map),
            TextShape::Json(_) | TextShape::Free => Self::Text(text.to_owned()),
            TextShape::Delimited(delimiter) => match DataFrame::from_csv(text, delimiter, false) {
                Ok(frame) => Self::Frame(frame),
                Err(error) => {
                    debug!(%error, "delimited-looking text did not parse, keeping it as text");
                    Self::Text(text.to_owned())
                }
            },
        };
        debug!(kind = %input.kind(), "classified text input");
        Ok(input)
    }

    #[must_use]
    pub const fn kind(&self) -> InputKind {
        match self {
            Self::Keyed(_) => InputKind::Keyed,
            Self::Frame(_) => InputKind::Frame,
            Self::Text(_) => InputKind::Text,
            Self::Url(_) => InputKind::Url,
        }
    }

    #[must_use]
    pub fn as_frame(&self) -> Option<&DataFrame> {
        match self {
            Self::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_keyed(&self) -> Option<&JsonMap> {
        match self {
            Self::Keyed(map) => Some(map),
            _ => None,
        }
    }

    /// The value as a mapping with no semantic reshaping.
    #[must_use]
    pub fn raw_dict_form(&self) -> JsonMap {
        match self {
            Self::Keyed(map) => map.clone(),
            Self::Frame(frame) => frame.raw_dict_form(),
            Self::Text(text) => text_raw_dict_form(text),
            Self::Url(url) => url.raw_dict_form(),
        }
    }
}

fn text_raw_dict_form(text: &str) -> JsonMap {
    let raw = match serde_json::from_str::<Value>(text) {
        Ok(value @ (Value::Object(_) | Value::Array(_) | Value::String(_))) => value,
        _ => Value::String(text.to_owned()),
    };
    let mut map = JsonMap::new();
    map.insert(RAW.to_owned(), raw);
    map
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

/// An input together with the profile used to render it.
#[derive(Debug, Clone, Default)]
pub struct WrappedData {
    input: InputData,
    profile: Option<Profile>,
}

impl WrappedData {
    #[must_use]
    pub fn new(input: impl Into<InputData>) -> Self {
        Self {
            input: input.into(),
            profile: None,
        }
    }

    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<Profile>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    #[must_use]
    pub fn input(&self) -> &InputData {
        &self.input
    }

    /// Replaces the input wholesale. The attached profile is kept.
    pub fn set_input(&mut self, input: impl Into<InputData>) {
        self.input = input.into();
    }

    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn profile_mut(&mut self) -> Option<&mut Profile> {
        self.profile.as_mut()
    }

    pub fn set_profile(&mut self, profile: Option<Profile>) {
        self.profile = profile;
    }

    #[must_use]
    pub fn raw_dict_form(&self) -> JsonMap {
        self.input.raw_dict_form()
    }

    /// Renders through the attached profile, or the raw dict form without one.
    pub fn canonical_view(&self, options: &ProfileOptions) -> CxResult<JsonMap> {
        match &self.profile {
            Some(profile) => profile.render(&self.input, options),
            None => Ok(self.raw_dict_form()),
        }
    }
}

impl From<InputData> for WrappedData {
    fn from(value: InputData) -> Self {
        Self::new(value)
    }
}

impl From<DataFrame> for WrappedData {
    fn from(value: DataFrame) -> Self {
        Self::new(value)
    }
}

impl From<JsonMap> for WrappedData {
    fn from(value: JsonMap) -> Self {
        Self::new(value)
    }
}

impl PartialEq for WrappedData {
    fn eq(&self, other: &Self) -> bool {
        self.input == other.input
    }
}

impl PartialOrd for WrappedData {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        let left = self.raw_dict_form();
        let right = other.raw_dict_form();
        Some(
            left.len()
                .cmp(&right.len())
                .then_with(|| Value::Object(left).to_string().cmp(&Value::Object(right).to_string())),
        )
    }
}
