use serde_json::Value;

use crate::error::{CxError, CxResult};

/// Renders a label cell as the string used for matching and as a mapping key.
///
/// Strings are taken verbatim, numbers and booleans use their JSON text.
/// Returns `None` for null, arrays and objects.
#[must_use]
pub fn label_key(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub(crate) fn require_label_key(value: &Value, context: &str) -> CxResult<String> {
    label_key(value).ok_or_else(|| {
        CxError::invalid_type(format!("{context} must be a scalar label, found {value}"))
    })
}

/// Positional labels `"1"`, `"2"`, ... used when a payload lacks `vars`/`smps`.
#[must_use]
pub fn positional_labels(count: usize) -> Vec<Value> {
    (1..=count).map(|i| Value::String(i.to_string())).collect()
}

/// Unwraps single-element arrays down to their scalar.
///
/// Tabular cells occasionally arrive boxed (`[5]` rather than `5`) when a
/// frame was built from nested records; annotation payloads expect scalars.
#[must_use]
pub fn native_scalar(value: &Value) -> Value {
    match value {
        Value::Array(items) if items.len() == 1 && !items[0].is_array() => items[0].clone(),
        other => other.clone(),
    }
}
