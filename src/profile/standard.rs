use serde_json::Value;
use tracing::{debug, trace};

use crate::core::keys::{CORS, DATA, SMPS, VARS, X, Y, Z};
use crate::core::{DataFrame, JsonMap, positional_labels};
use crate::data::{InputData, json_type_name};
use crate::error::{CxError, CxResult};

use super::{DataProfile, ProfileOptions, unsupported_input};

/// Standard `y`/`x`/`z` profile.
///
/// Labels set on the profile override those found in the data. `x` and `z`
/// set on the profile are used only when the data has none of its own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StandardProfile {
    vars: Vec<Value>,
    smps: Vec<Value>,
    x: JsonMap,
    z: JsonMap,
}

impl StandardProfile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn vars(&self) -> &[Value] {
        &self.vars
    }

    /// Row labels; an empty vector clears the override.
    pub fn set_vars(&mut self, vars: Vec<Value>) {
        self.vars = vars;
    }

    #[must_use]
    pub fn with_vars(mut self, vars: Vec<Value>) -> Self {
        self.vars = vars;
        self
    }

    #[must_use]
    pub fn smps(&self) -> &[Value] {
        &self.smps
    }

    /// Column labels; an empty vector clears the override.
    pub fn set_smps(&mut self, smps: Vec<Value>) {
        self.smps = smps;
    }

    #[must_use]
    pub fn with_smps(mut self, smps: Vec<Value>) -> Self {
        self.smps = smps;
        self
    }

    #[must_use]
    pub fn x(&self) -> &JsonMap {
        &self.x
    }

    /// Sample annotations, either bare (`{name: [...]}`) or wrapped (`{x: {...}}`).
    pub fn set_x(&mut self, x: Option<JsonMap>) -> CxResult<()> {
        self.x = annotation_section(X, x)?;
        Ok(())
    }

    #[must_use]
    pub fn z(&self) -> &JsonMap {
        &self.z
    }

    /// Variable annotations, either bare (`{name: [...]}`) or wrapped (`{z: {...}}`).
    pub fn set_z(&mut self, z: Option<JsonMap>) -> CxResult<()> {
        self.z = annotation_section(Z, z)?;
        Ok(())
    }

    fn y_from_frame(&self, frame: &DataFrame) -> JsonMap {
        let mut y = JsonMap::new();
        y.insert(VARS.to_owned(), Value::Array(label_override(&self.vars, frame.index())));
        y.insert(SMPS.to_owned(), Value::Array(label_override(&self.smps, frame.columns())));
        y.insert(
            DATA.to_owned(),
            Value::Array(frame.rows().iter().cloned().map(Value::Array).collect()),
        );
        y
    }

    fn y_from_existing(&self, existing: Value) -> CxResult<JsonMap> {
        let Value::Object(mut y) = existing else {
            return Err(CxError::profile(format!(
                "y must be a mapping of lists, found {}",
                json_type_name(&existing)
            )));
        };
        if !self.vars.is_empty() {
            y.insert(VARS.to_owned(), Value::Array(self.vars.clone()));
        }
        if !self.smps.is_empty() {
            y.insert(SMPS.to_owned(), Value::Array(self.smps.clone()));
        }
        Ok(y)
    }

    /// Builds `y` from a mapping that has no `y` block of its own.
    fn y_from_toplevel(&self, keyed: &JsonMap) -> JsonMap {
        let mut y = JsonMap::new();
        y.insert(VARS.to_owned(), Value::Array(self.vars.clone()));
        y.insert(SMPS.to_owned(), Value::Array(self.smps.clone()));
        y.insert(DATA.to_owned(), Value::Array(Vec::new()));

        for (key, value) in keyed {
            match key.as_str() {
                X | Z => {}
                DATA | CORS => {
                    y.insert(key.clone(), value.clone());
                }
                VARS if self.vars.is_empty() => {
                    y.insert(key.clone(), value.clone());
                }
                SMPS if self.smps.is_empty() => {
                    y.insert(key.clone(), value.clone());
                }
                _ => {}
            }
        }

        let data_missing = y
            .get(DATA)
            .is_none_or(|value| value.is_null() || is_empty_list(value));
        if data_missing {
            let candidate = keyed
                .iter()
                .find(|(key, value)| {
                    !matches!(key.as_str(), X | Z | VARS | SMPS | CORS | DATA) && value.is_array()
                })
                .map(|(key, value)| (key.clone(), value.clone()));
            if let Some((key, value)) = candidate {
                trace!(key = %key, "using top-level list as y.data");
                y.insert(DATA.to_owned(), value);
            }
        }
        y
    }
}

impl DataProfile for StandardProfile {
    fn render(&self, data: &InputData, options: &ProfileOptions) -> CxResult<JsonMap> {
        let (mut y, x, z) = match data {
            InputData::Frame(frame) => (self.y_from_frame(frame), None, None),
            InputData::Keyed(keyed) => {
                let mut keyed = keyed.clone();
                let y = match keyed.shift_remove(Y) {
                    Some(existing) if !existing.is_null() => self.y_from_existing(existing)?,
                    _ => self.y_from_toplevel(&keyed),
                };
                (y, keyed.shift_remove(X), keyed.shift_remove(Z))
            }
            other => return Err(unsupported_input("standard", other)),
        };

        drop_null(&mut y, DATA);
        drop_null(&mut y, CORS);
        validate_matrix(&y, DATA)?;
        validate_matrix(&y, CORS)?;

        let data_rows = matrix_rows(&y, DATA);
        let cors_rows = matrix_rows(&y, CORS);
        let proxy: Vec<Value> = if data_rows.is_empty() && !cors_rows.is_empty() {
            y.shift_remove(DATA);
            cors_rows
        } else {
            if !y.contains_key(DATA) {
                y.insert(DATA.to_owned(), Value::Array(Vec::new()));
            }
            data_rows
        };
        let first_row_len = proxy
            .first()
            .and_then(Value::as_array)
            .map_or(0, Vec::len);

        let vars = fill_labels(&mut y, VARS, proxy.len())?;
        let smps = fill_labels(&mut y, SMPS, first_row_len)?;

        if options.match_vars_to_rows && proxy.len() != vars {
            return Err(CxError::profile(format!(
                "rows vs vars count mismatch: {} vs {vars}",
                proxy.len()
            )));
        }
        if options.match_smps_to_cols && first_row_len != smps {
            return Err(CxError::profile(format!(
                "columns vs smps count mismatch: {first_row_len} vs {smps}"
            )));
        }

        let x = resolve_section(&self.x, x, X)?;
        let z = resolve_section(&self.z, z, Z)?;
        if options.match_x_to_smps {
            check_section_lengths(&x, X, SMPS, smps)?;
        }
        if options.match_z_to_vars {
            check_section_lengths(&z, Z, VARS, vars)?;
        }

        debug!(
            vars,
            smps,
            x_annotations = x.len(),
            z_annotations = z.len(),
            "rendered standard profile"
        );

        let mut payload = JsonMap::new();
        payload.insert(Y.to_owned(), Value::Object(y));
        if !x.is_empty() {
            payload.insert(X.to_owned(), Value::Object(x));
        }
        if !z.is_empty() {
            payload.insert(Z.to_owned(), Value::Object(z));
        }
        Ok(payload)
    }
}

fn annotation_section(name: &str, value: Option<JsonMap>) -> CxResult<JsonMap> {
    let Some(mut map) = value else {
        return Ok(JsonMap::new());
    };
    if let Some(inner) = map.shift_remove(name) {
        map = match inner {
            Value::Object(inner) => inner,
            other => {
                return Err(CxError::invalid_type(format!(
                    "{name} must be a mapping of lists, found {}",
                    json_type_name(&other)
                )));
            }
        };
    }
    if let Some((key, value)) = map.iter().find(|(_, value)| !value.is_array()) {
        return Err(CxError::invalid_type(format!(
            "{name}[{key}] must be a list, found {}",
            json_type_name(value)
        )));
    }
    Ok(map)
}

fn resolve_section(own: &JsonMap, from_data: Option<Value>, name: &str) -> CxResult<JsonMap> {
    let chosen = match from_data {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => own.clone(),
    };
    if let Some((key, value)) = chosen.iter().find(|(_, value)| !value.is_array()) {
        return Err(CxError::profile(format!(
            "data[{name}][{key}] must be a list, found {}",
            json_type_name(value)
        )));
    }
    Ok(chosen)
}

fn label_override(preferred: &[Value], fallback: &[Value]) -> Vec<Value> {
    if preferred.is_empty() {
        fallback.to_vec()
    } else {
        preferred.to_vec()
    }
}

fn is_empty_list(value: &Value) -> bool {
    value.as_array().is_some_and(Vec::is_empty)
}

/// A null matrix counts as absent.
fn drop_null(y: &mut JsonMap, key: &str) {
    if y.get(key).is_some_and(Value::is_null) {
        y.shift_remove(key);
    }
}

fn validate_matrix(y: &JsonMap, key: &str) -> CxResult<()> {
    let Some(value) = y.get(key) else {
        return Ok(());
    };
    let Some(rows) = value.as_array() else {
        return Err(CxError::profile(format!(
            "{key} must be a list of rows, found {}",
            json_type_name(value)
        )));
    };
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| !row.is_array()) {
        return Err(CxError::profile(format!(
            "{key} must be a list of rows, found {} at row {index}",
            json_type_name(row)
        )));
    }
    Ok(())
}

fn matrix_rows(y: &JsonMap, key: &str) -> Vec<Value> {
    y.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Ensures `y[key]` is a list, filling positional labels when it is empty.
/// Returns the resulting label count.
fn fill_labels(y: &mut JsonMap, key: &str, count: usize) -> CxResult<usize> {
    match y.get(key) {
        None | Some(Value::Null) => {}
        Some(Value::Array(labels)) if !labels.is_empty() => return Ok(labels.len()),
        Some(Value::Array(_)) => {}
        Some(other) => {
            return Err(CxError::profile(format!(
                "{key} must be a list, found {}",
                json_type_name(other)
            )));
        }
    }
    y.insert(key.to_owned(), Value::Array(positional_labels(count)));
    Ok(count)
}

fn check_section_lengths(section: &JsonMap, name: &str, labels: &str, expected: usize) -> CxResult<()> {
    for (key, value) in section {
        let len = value.as_array().map_or(0, Vec::len);
        if len != expected {
            return Err(CxError::profile(format!(
                "{name}[{key}] has {len} entries but y.{labels} has {expected}"
            )));
        }
    }
    Ok(())
}
