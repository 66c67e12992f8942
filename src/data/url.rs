use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::JsonMap;
use crate::core::keys::RAW;
use crate::error::{CxError, CxResult};

/// A URL handed to the charting library, which fetches the data itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UrlData {
    url: String,
}

/// Generic URL components, split the way `scheme://netloc/path?query#fragment` reads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UrlComponents {
    pub scheme: String,
    pub netloc: String,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

impl UrlData {
    /// Accepts any URL with a scheme, such as `file://` or `https://`.
    pub fn new(url: impl Into<String>) -> CxResult<Self> {
        let url = url.into();
        validate_url(&url)?;
        Ok(Self { url })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn components(&self) -> UrlComponents {
        split_components(&self.url)
    }

    /// `{raw: <url>}`
    #[must_use]
    pub fn raw_dict_form(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert(RAW.to_owned(), Value::String(self.url.clone()));
        map
    }
}

impl TryFrom<String> for UrlData {
    type Error = CxError;

    fn try_from(value: String) -> CxResult<Self> {
        Self::new(value)
    }
}

impl From<UrlData> for String {
    fn from(value: UrlData) -> Self {
        value.url
    }
}

pub fn validate_url(url: &str) -> CxResult<()> {
    match scheme_of(url) {
        Some(_) => Ok(()),
        None => Err(CxError::InvalidUrl(format!(
            "URLs must specify a scheme (e.g., file://, http://), found {url:?}"
        ))),
    }
}

fn scheme_of(url: &str) -> Option<&str> {
    let (scheme, _) = url.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    let valid = first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

fn split_components(url: &str) -> UrlComponents {
    let Some(scheme) = scheme_of(url) else {
        return UrlComponents::default();
    };
    let rest = &url[scheme.len() + 1..];

    let (rest, fragment) = rest.split_once('#').unwrap_or((rest, ""));
    let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));
    let (netloc, path) = match rest.strip_prefix("//") {
        Some(authority) => match authority.find('/') {
            Some(slash) => (&authority[..slash], &authority[slash..]),
            None => (authority, ""),
        },
        None => ("", rest),
    };

    UrlComponents {
        scheme: scheme.to_ascii_lowercase(),
        netloc: netloc.to_owned(),
        path: path.to_owned(),
        query: query.to_owned(),
        fragment: fragment.to_owned(),
    }
}
