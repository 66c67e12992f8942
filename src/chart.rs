//! Chart assembly: data, config, events and afterRender calls rendered into
//! the HTML and JavaScript fragments a page embeds.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::align::merge_frames_into_xyz;
use crate::config::Configs;
use crate::core::keys::RAW;
use crate::core::{DataFrame, JsonMap};
use crate::data::{InputData, WrappedData};
use crate::error::{CxError, CxResult};
use crate::events::Events;
use crate::profile::{DataProfile, Profile, ProfileOptions};
use crate::template::render_from_template;

pub const DEFAULT_DIMENSION: u32 = 500;

const LICENSE_FILE: &str = "CanvasXpressLicense.js";
const VENN_GROUPS: &str = "vennGroups";
const SET_DIMENSIONS: &str = "setDimensions";

const JS_TEMPLATE: &str = "var cX@cx_target_id@ = new CanvasXpress(@cx_json@); @cx_functions@";
const LICENSE_TEMPLATE: &str = "<script src='@cx_license@' type='text/javascript'></script>";

/// Init params owned by dedicated chart fields.
const RESERVED_PARAMS: [&str; 7] = [
    "id",
    "width",
    "height",
    "data",
    "config",
    "afterRender",
    "renderTo",
];

/// One `afterRender` call: a chart method name and its arguments.
pub type AfterRenderCall = (String, Vec<Value>);

/// Fragments a page needs to show one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlParts {
    /// Script constructing the chart and running its afterRender calls.
    pub cx_js: String,
    /// The `<canvas>` element the chart draws into.
    pub cx_canvas: String,
    /// License `<script>` tag, when a license URL is set.
    pub cx_license: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Chart {
    render_to: Option<String>,
    data: WrappedData,
    sample_annotation: Option<DataFrame>,
    variable_annotation: Option<DataFrame>,
    config: Configs,
    after_render: Vec<AfterRenderCall>,
    other_init_params: JsonMap,
    events: Events,
    width: u32,
    height: u32,
    license_url: Option<String>,
    profile_options: ProfileOptions,
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            render_to: None,
            data: WrappedData::default(),
            sample_annotation: None,
            variable_annotation: None,
            config: Configs::new(),
            after_render: Vec::new(),
            other_init_params: JsonMap::new(),
            events: Events::new(),
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
            license_url: None,
            profile_options: ProfileOptions::default(),
        }
    }
}

impl Chart {
    #[must_use]
    pub fn new(render_to: Option<&str>, data: impl Into<WrappedData>) -> Self {
        let mut chart = Self {
            data: data.into(),
            ..Self::default()
        };
        chart.set_render_to(render_to);
        chart
    }

    /// Keeps only ASCII alphanumerics and `_`; nothing left means anonymous.
    pub fn set_render_to(&mut self, render_to: Option<&str>) {
        self.render_to = render_to
            .map(|id| {
                id.chars()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                    .collect::<String>()
            })
            .filter(|id| !id.is_empty());
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.render_to.is_none()
    }

    /// The configured id, or a fresh random id for anonymous charts.
    #[must_use]
    pub fn render_id(&self) -> String {
        match &self.render_to {
            Some(id) => id.clone(),
            None => {
                let id: u128 = rand::thread_rng().r#gen();
                format!("{id:032x}")
            }
        }
    }

    #[must_use]
    pub fn data(&self) -> &WrappedData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut WrappedData {
        &mut self.data
    }

    pub fn set_data(&mut self, data: impl Into<WrappedData>) {
        self.data = data.into();
    }

    #[must_use]
    pub fn sample_annotation(&self) -> Option<&DataFrame> {
        self.sample_annotation.as_ref()
    }

    pub fn set_sample_annotation(&mut self, annotation: Option<DataFrame>) {
        self.sample_annotation = annotation;
    }

    #[must_use]
    pub fn variable_annotation(&self) -> Option<&DataFrame> {
        self.variable_annotation.as_ref()
    }

    pub fn set_variable_annotation(&mut self, annotation: Option<DataFrame>) {
        self.variable_annotation = annotation;
    }

    #[must_use]
    pub fn config(&self) -> &Configs {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Configs {
        &mut self.config
    }

    #[must_use]
    pub fn with_config(mut self, config: Configs) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn after_render(&self) -> &[AfterRenderCall] {
        &self.after_render
    }

    pub fn add_after_render(&mut self, method: impl Into<String>, params: Vec<Value>) {
        self.after_render.push((method.into(), params));
    }

    #[must_use]
    pub fn other_init_params(&self) -> &JsonMap {
        &self.other_init_params
    }

    /// Reserved keys (`renderTo`, `data`, `config`, ...) are dropped.
    pub fn set_other_init_params(&mut self, mut params: JsonMap) {
        for reserved in RESERVED_PARAMS {
            if params.shift_remove(reserved).is_some() {
                debug!(param = reserved, "dropped reserved init param");
            }
        }
        self.other_init_params = params;
    }

    #[must_use]
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut Events {
        &mut self.events
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) -> CxResult<()> {
        self.width = checked_dimension("width", width)?;
        Ok(())
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_height(&mut self, height: u32) -> CxResult<()> {
        self.height = checked_dimension("height", height)?;
        Ok(())
    }

    #[must_use]
    pub fn license_url(&self) -> Option<&str> {
        self.license_url.as_deref()
    }

    pub fn set_license_url(&mut self, url: Option<String>) -> CxResult<()> {
        if let Some(url) = &url {
            if !url.contains(LICENSE_FILE) {
                return Err(CxError::InvalidChart(format!(
                    "license files must be named {LICENSE_FILE}, got {url:?}"
                )));
            }
        }
        self.license_url = url;
        Ok(())
    }

    #[must_use]
    pub fn profile_options(&self) -> ProfileOptions {
        self.profile_options
    }

    #[must_use]
    pub fn with_profile_options(mut self, options: ProfileOptions) -> Self {
        self.profile_options = options;
        self
    }

    /// The data mapping sent to the chart.
    ///
    /// Frame data with annotations is merged into `{y, x, z}` first. Data
    /// without a profile is rendered with the profile its `graphType` calls
    /// for; text and URL data pass through as `{raw: ...}`.
    pub fn data_payload(&self) -> CxResult<JsonMap> {
        let mut options = self.profile_options;
        if let Some(groups) = self.config.count_param(VENN_GROUPS) {
            options.venn_groups = Some(groups);
        }

        let has_annotations = self.sample_annotation.is_some() || self.variable_annotation.is_some();
        match self.data.input() {
            InputData::Frame(frame) if has_annotations => {
                let merged = merge_frames_into_xyz(
                    frame,
                    self.sample_annotation.as_ref(),
                    self.variable_annotation.as_ref(),
                )?;
                self.resolved_profile().render(&InputData::Keyed(merged), &options)
            }
            input if has_annotations => Err(CxError::InvalidChart(format!(
                "annotations require frame data, found {} data",
                input.kind()
            ))),
            InputData::Text(_) | InputData::Url(_) => Ok(self.data.raw_dict_form()),
            input => self.resolved_profile().render(input, &options),
        }
    }

    fn resolved_profile(&self) -> Profile {
        match self.data.profile() {
            Some(profile) => profile.clone(),
            None => {
                let graph_type = self.config.graph_type();
                let profile = graph_type
                    .map(|graph_type| graph_type.default_profile())
                    .unwrap_or_default();
                debug!(
                    graph_type = graph_type.map(|graph_type| graph_type.as_str()),
                    profile = profile.name(),
                    "selected profile for unprofiled data"
                );
                profile
            }
        }
    }

    /// Data as it appears in the constructor; `{raw: ...}` is unwrapped.
    fn data_value(&self) -> CxResult<Value> {
        let mut payload = self.data_payload()?;
        Ok(match payload.shift_remove(RAW) {
            Some(raw) if payload.is_empty() => raw,
            Some(raw) => {
                payload.insert(RAW.to_owned(), raw);
                Value::Object(payload)
            }
            None => Value::Object(payload),
        })
    }

    pub fn render_to_html_parts(&self) -> CxResult<HtmlParts> {
        // One id for every fragment, even when anonymous.
        let render_id = self.render_id();

        let constructor = self.constructor_js(&render_id)?;

        let mut functions = Vec::with_capacity(self.after_render.len());
        for (method, params) in &self.after_render {
            let params = params
                .iter()
                .map(serde_json::to_string)
                .collect::<Result<Vec<_>, _>>()?;
            functions.push(format!(
                "CanvasXpress.$('{render_id}').{method}({})",
                params.join(", ")
            ));
        }

        let cx_js = render_from_template(
            JS_TEMPLATE,
            &[
                ("cx_target_id", render_id.clone()),
                ("cx_json", constructor),
                ("cx_functions", format!("\n{};\n", functions.join("; "))),
            ],
        );

        let cx_canvas = format!(
            "<canvas id={} width={} height={}></canvas>",
            serde_json::to_string(&render_id)?,
            self.width,
            self.height
        );

        let cx_license = self
            .license_url
            .as_deref()
            .map(|url| render_from_template(LICENSE_TEMPLATE, &[("cx_license", url)]));

        debug!(
            render_to = %render_id,
            anonymous = self.is_anonymous(),
            after_render = self.after_render.len(),
            "rendered chart html parts"
        );
        Ok(HtmlParts {
            cx_js,
            cx_canvas,
            cx_license,
        })
    }

    /// The constructor object literal. `events` holds bare JavaScript
    /// functions, so it is spliced in after the JSON part is serialized.
    fn constructor_js(&self, render_id: &str) -> CxResult<String> {
        let mut head = JsonMap::new();
        head.insert("renderTo".to_owned(), Value::String(render_id.to_owned()));
        head.insert("data".to_owned(), self.data_value()?);
        head.insert("config".to_owned(), Value::Object(self.config.render_to_dict()));

        // Compact serialization of a non-empty map always ends in `}`.
        let mut js = serde_json::to_string(&Value::Object(head))?;
        js.pop();
        js.push_str(",\"events\":");
        js.push_str(&self.events.render_to_js()?);
        for (key, value) in &self.other_init_params {
            js.push(',');
            js.push_str(&serde_json::to_string(key)?);
            js.push(':');
            js.push_str(&serde_json::to_string(value)?);
        }
        js.push('}');
        Ok(js)
    }

    /// Serializes the chart in the shape CanvasXpress saves for reproducible
    /// research; [`Chart::from_reproducible_json`] reads it back.
    pub fn render_to_reproducible_json(&self) -> CxResult<String> {
        let after_render: Vec<Value> = self
            .after_render
            .iter()
            .map(|(method, params)| {
                Value::Array(vec![Value::String(method.clone()), Value::Array(params.clone())])
            })
            .collect();

        let mut document = JsonMap::new();
        document.insert("renderTo".to_owned(), Value::String(self.render_id()));
        document.insert("data".to_owned(), self.data_value()?);
        document.insert("config".to_owned(), Value::Object(self.config.render_to_dict()));
        document.insert("afterRender".to_owned(), Value::Array(after_render));
        document.insert("width".to_owned(), Value::from(self.width));
        document.insert("height".to_owned(), Value::from(self.height));
        for (key, value) in &self.other_init_params {
            document.insert(key.clone(), value.clone());
        }
        Ok(serde_json::to_string_pretty(&Value::Object(document))?)
    }

    /// Rebuilds a chart from reproducible research JSON.
    ///
    /// `factory` and `system` are dropped unless requested. A `setDimensions`
    /// afterRender call is lifted into width and height; unknown top-level
    /// keys become other init params.
    pub fn from_reproducible_json(
        json: &str,
        include_factory: bool,
        include_system: bool,
    ) -> CxResult<Self> {
        let document: Value = serde_json::from_str(json)?;
        let Value::Object(mut document) = document else {
            return Err(invalid_document("top level must be a mapping"));
        };
        if !include_factory {
            document.shift_remove("factory");
        }
        if !include_system {
            document.shift_remove("system");
        }

        let render_to = document.shift_remove("renderTo");
        let data = document.shift_remove("data");
        let config = document.shift_remove("config");
        let after_render = document.shift_remove("afterRender");
        let mut width = dimension_value(document.shift_remove("width"), "width")?;
        let mut height = dimension_value(document.shift_remove("height"), "height")?;

        let mut chart = Self::new(render_to.as_ref().and_then(Value::as_str), input_from_json(data)?);
        chart.config = match config {
            None | Some(Value::Null) => Configs::new(),
            Some(Value::Object(map)) => Configs::from_json_map(map)?,
            Some(_) => return Err(invalid_document("config must be a mapping")),
        };

        for (method, params) in after_render_calls(after_render)? {
            if method == SET_DIMENSIONS {
                if let Some(w) = params.first().and_then(Value::as_u64) {
                    width = u32::try_from(w).ok();
                }
                if let Some(h) = params.get(1).and_then(Value::as_u64) {
                    height = u32::try_from(h).ok();
                }
                continue;
            }
            chart.after_render.push((method, params));
        }

        chart.set_width(width.unwrap_or(DEFAULT_DIMENSION))?;
        chart.set_height(height.unwrap_or(DEFAULT_DIMENSION))?;
        chart.set_other_init_params(document);
        debug!(
            render_to = ?chart.render_to,
            width = chart.width,
            height = chart.height,
            "loaded chart from reproducible json"
        );
        Ok(chart)
    }
}

fn checked_dimension(name: &str, value: u32) -> CxResult<u32> {
    if value < 1 {
        return Err(CxError::InvalidChart(format!(
            "{name} cannot be less than 1 pixel"
        )));
    }
    Ok(value)
}

fn invalid_document(reason: &str) -> CxError {
    CxError::InvalidChart(format!("not a reproducible research document: {reason}"))
}

fn dimension_value(value: Option<Value>, name: &str) -> CxResult<Option<u32>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid_document(&format!("{name} must be a positive integer"))),
    }
}

fn input_from_json(data: Option<Value>) -> CxResult<InputData> {
    match data {
        None | Some(Value::Null) => Ok(InputData::default()),
        Some(Value::String(text)) => InputData::from_text(&text),
        Some(value @ Value::Object(_)) => InputData::keyed(value),
        Some(_) => Err(invalid_document("data must be a mapping or text")),
    }
}

fn after_render_calls(value: Option<Value>) -> CxResult<Vec<AfterRenderCall>> {
    let calls = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(calls)) => calls,
        Some(_) => return Err(invalid_document("afterRender must be a list")),
    };

    let mut parsed = Vec::with_capacity(calls.len());
    for call in calls {
        let Value::Array(mut parts) = call else {
            warn!("skipping afterRender entry that is not a list");
            continue;
        };
        if parts.len() < 2 {
            warn!(parts = parts.len(), "skipping afterRender entry without params");
            continue;
        }
        let params = match parts.swap_remove(1) {
            Value::Array(params) => params,
            other => vec![other],
        };
        let Value::String(method) = parts.swap_remove(0) else {
            return Err(invalid_document("afterRender method names must be strings"));
        };
        parsed.push((method, params));
    }
    Ok(parsed)
}
