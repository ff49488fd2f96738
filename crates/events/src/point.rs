use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Phase of a job execution an event describes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPhase {
    Start,
    Finish,
    Error,
}

impl EventPhase {
    /// Value of the `event` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventPhase::Start => "start",
            EventPhase::Finish => "finish",
            EventPhase::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EventPhase::Finish | EventPhase::Error)
    }
}

impl core::fmt::Display for EventPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point field value.
///
/// Timings are numeric; the job identifier is carried as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Float(_) => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One time-series event: tags, values and an integer timestamp.
///
/// The series name, precision and retention policy travel alongside the point
/// in [`crate::MetricsSink::write_point`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub tags: BTreeMap<String, String>,
    pub values: BTreeMap<String, FieldValue>,
    /// Timestamp in the unit of the write's precision.
    pub timestamp: i64,
}

impl Point {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Numeric field value, if present.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(FieldValue::as_f64)
    }

    /// Phase recorded in the `event` tag.
    pub fn phase(&self) -> Option<EventPhase> {
        match self.tag("event")? {
            "start" => Some(EventPhase::Start),
            "finish" => Some(EventPhase::Finish),
            "error" => Some(EventPhase::Error),
            _ => None,
        }
    }
}
