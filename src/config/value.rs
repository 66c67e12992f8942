use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::JsonMap;
use crate::error::{CxError, CxResult};

use super::GraphType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `rgb(r, g, b)`.
    #[must_use]
    pub fn parse_css(text: &str) -> Option<Self> {
        let parts = css_components(text, "rgb(")?;
        let [r, g, b] = parts.as_slice() else {
            return None;
        };
        Some(Self::new(
            channel_text(r)?,
            channel_text(g)?,
            channel_text(b)?,
        ))
    }

    /// Accepts exactly three integers in `0..=255`.
    #[must_use]
    pub fn from_list(values: &[Value]) -> Option<Self> {
        let [r, g, b] = values else {
            return None;
        };
        Some(Self::new(channel(r)?, channel(g)?, channel(b)?))
    }

    /// Accepts a mapping with exactly the keys `r`, `g` and `b`.
    #[must_use]
    pub fn from_dict(values: &JsonMap) -> Option<Self> {
        if values.len() != 3 {
            return None;
        }
        Some(Self::new(
            channel(values.get("r")?)?,
            channel(values.get("g")?)?,
            channel(values.get("b")?)?,
        ))
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// RGB color with an alpha channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: OrderedFloat<f64>,
}

impl RgbaColor {
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> CxResult<Self> {
        if !(0.0..=1.0).contains(&a) {
            return Err(CxError::InvalidConfig(format!(
                "alpha must be within 0..=1, got {a}"
            )));
        }
        Ok(Self {
            r,
            g,
            b,
            a: OrderedFloat(a),
        })
    }

    /// Parses `rgba(r, g, b, a)`.
    #[must_use]
    pub fn parse_css(text: &str) -> Option<Self> {
        let parts = css_components(text, "rgba(")?;
        let [r, g, b, a] = parts.as_slice() else {
            return None;
        };
        Self::new(
            channel_text(r)?,
            channel_text(g)?,
            channel_text(b)?,
            a.parse().ok()?,
        )
        .ok()
    }

    /// Accepts three integers in `0..=255` followed by a numeric alpha.
    #[must_use]
    pub fn from_list(values: &[Value]) -> Option<Self> {
        let [r, g, b, a] = values else {
            return None;
        };
        Self::new(channel(r)?, channel(g)?, channel(b)?, a.as_f64()?).ok()
    }

    /// Accepts a mapping with exactly the keys `r`, `g`, `b` and `a`.
    #[must_use]
    pub fn from_dict(values: &JsonMap) -> Option<Self> {
        if values.len() != 4 {
            return None;
        }
        Self::new(
            channel(values.get("r")?)?,
            channel(values.get("g")?)?,
            channel(values.get("b")?)?,
            values.get("a")?.as_f64()?,
        )
        .ok()
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

fn css_components<'a>(text: &'a str, prefix: &str) -> Option<Vec<&'a str>> {
    let inner = text.trim().strip_prefix(prefix)?.strip_suffix(')')?;
    Some(inner.split(',').map(str::trim).collect())
}

fn channel(value: &Value) -> Option<u8> {
    value.as_i64().and_then(|n| u8::try_from(n).ok())
}

fn channel_text(text: &str) -> Option<u8> {
    text.parse::<i64>().ok().and_then(|n| u8::try_from(n).ok())
}

/// A single typed config entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    List(Vec<Value>),
    Dict(JsonMap),
    RgbColor(RgbColor),
    RgbaColor(RgbaColor),
    GraphType(GraphType),
}

impl ConfigValue {
    /// Infers the variant for a JSON value.
    ///
    /// Color shapes are tried before the generic list, mapping and string
    /// variants, RGBA ahead of RGB. Null is rejected.
    pub fn infer(value: Value) -> CxResult<Self> {
        Ok(match value {
            Value::Null => return Err(CxError::InvalidConfig("value cannot be null".to_owned())),
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => match number.as_i64() {
                Some(int) => Self::Int(int),
                None => Self::Float(OrderedFloat(number.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(text) => {
                if let Some(color) = RgbaColor::parse_css(&text) {
                    Self::RgbaColor(color)
                } else if let Some(color) = RgbColor::parse_css(&text) {
                    Self::RgbColor(color)
                } else {
                    Self::String(text)
                }
            }
            Value::Array(items) => {
                if let Some(color) = RgbaColor::from_list(&items) {
                    Self::RgbaColor(color)
                } else if let Some(color) = RgbColor::from_list(&items) {
                    Self::RgbColor(color)
                } else {
                    Self::List(items)
                }
            }
            Value::Object(entries) => {
                if let Some(color) = RgbaColor::from_dict(&entries) {
                    Self::RgbaColor(color)
                } else if let Some(color) = RgbColor::from_dict(&entries) {
                    Self::RgbColor(color)
                } else {
                    Self::Dict(entries)
                }
            }
        })
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
            Self::RgbColor(_) => "rgb color",
            Self::RgbaColor(_) => "rgba color",
            Self::GraphType(_) => "graph type",
        }
    }

    /// Rendered form; colors become CSS color strings.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(text) => Value::String(text.clone()),
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Int(int) => Value::from(*int),
            Self::Float(float) => Value::from(float.into_inner()),
            Self::List(items) => Value::Array(items.clone()),
            Self::Dict(entries) => Value::Object(entries.clone()),
            Self::RgbColor(color) => Value::String(color.to_string()),
            Self::RgbaColor(color) => Value::String(color.to_string()),
            Self::GraphType(graph_type) => Value::String(graph_type.as_str().to_owned()),
        }
    }
}

impl From<GraphType> for ConfigValue {
    fn from(value: GraphType) -> Self {
        Self::GraphType(value)
    }
}

impl From<RgbColor> for ConfigValue {
    fn from(value: RgbColor) -> Self {
        Self::RgbColor(value)
    }
}

impl From<RgbaColor> for ConfigValue {
    fn from(value: RgbaColor) -> Self {
        Self::RgbaColor(value)
    }
}
