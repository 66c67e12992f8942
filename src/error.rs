use std::fmt;

use thiserror::Error;

pub type CxResult<T> = Result<T, CxError>;

/// Axis of the primary matrix an annotation table is aligned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationAxis {
    /// Sample annotations (`x`), aligned against `smps`.
    Sample,
    /// Variable annotations (`z`), aligned against `vars`.
    Variable,
}

impl fmt::Display for AnnotationAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sample => f.write_str("sample"),
            Self::Variable => f.write_str("variable"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CxError {
    #[error("invalid type: {0}")]
    InvalidType(String),

    #[error("profile validation failed: {0}")]
    Profile(String),

    #[error("{axis} annotation could not be aligned with the primary data: {source}")]
    Alignment {
        axis: AnnotationAxis,
        #[source]
        source: Box<CxError>,
    },

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid chart: {0}")]
    InvalidChart(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl CxError {
    pub(crate) fn invalid_type(message: impl Into<String>) -> Self {
        Self::InvalidType(message.into())
    }

    pub(crate) fn profile(message: impl Into<String>) -> Self {
        Self::Profile(message.into())
    }
}
