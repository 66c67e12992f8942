//! JavaScript event handlers attached to a chart.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::JsonMap;
use crate::error::{CxError, CxResult};
use crate::template::render_from_template;

const EVENT_TEMPLATE: &str = "function(o, e, t){@script@}";

/// A CanvasXpress event such as `mousemove` and the body of its handler.
///
/// The handler is invoked with the chart object `o`, the DOM event `e` and
/// the target `t`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Event {
    id: String,
    script: String,
}

impl Event {
    pub fn new(id: impl Into<String>, script: impl Into<String>) -> CxResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CxError::InvalidChart("event id cannot be empty".to_owned()));
        }
        Ok(Self {
            id,
            script: script.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn script(&self) -> &str {
        &self.script
    }

    #[must_use]
    pub fn render_to_js(&self) -> String {
        render_from_template(EVENT_TEMPLATE, &[("script", self.script.as_str())])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Events {
    events: Vec<Event>,
}

impl Events {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn has(&self, event: &Event) -> bool {
        self.events.contains(event)
    }

    /// Appends `event`. With `unique`, an event whose id is already present
    /// is rejected.
    pub fn add(&mut self, event: Event, unique: bool) -> CxResult<()> {
        if unique && self.events.iter().any(|existing| existing.id == event.id) {
            return Err(CxError::InvalidChart(format!(
                "an event with id {:?} is already registered",
                event.id
            )));
        }
        self.events.push(event);
        Ok(())
    }

    /// Removes every copy of `event`; returns whether anything was removed.
    pub fn remove(&mut self, event: &Event) -> bool {
        let before = self.events.len();
        self.events.retain(|existing| existing != event);
        self.events.len() != before
    }

    /// `{id: "function(o, e, t){...}"}` with the handlers as strings.
    #[must_use]
    pub fn render_to_dict(&self) -> JsonMap {
        self.events
            .iter()
            .map(|event| (event.id.clone(), Value::String(event.render_to_js())))
            .collect()
    }

    /// A JavaScript object literal whose values are the bare handler functions,
    /// laid out like pretty-printed JSON with an 8-space indent.
    pub fn render_to_js(&self) -> CxResult<String> {
        if self.events.is_empty() {
            return Ok("{}".to_owned());
        }
        let mut entries = Vec::with_capacity(self.events.len());
        for event in &self.events {
            entries.push(format!(
                "        {}: {}",
                serde_json::to_string(&event.id)?,
                event.render_to_js()
            ));
        }
        Ok(format!("{{\n{}\n}}", entries.join(",\n")))
    }
}

impl FromIterator<Event> for Events {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
