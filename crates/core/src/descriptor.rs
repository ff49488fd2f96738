//! Job descriptors as handed over by the job queue.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};

/// Compile-time identity of a job class.
///
/// The Rust counterpart of passing a class reference around: exclusion lists
/// accept either `except_job::<W>()` or the plain name, and both normalize to
/// `CLASS_NAME`.
pub trait JobClass {
    const CLASS_NAME: &'static str;
}

/// One unit of work dispatched by the job queue.
///
/// Read-only to the instrumentation layer. Unknown payload fields are kept in
/// `extra` and never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub jid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
    pub class: String,
    /// Original class name when `class` names an adapter shim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapped: Option<String>,
    /// Enqueue time, fractional epoch seconds.
    pub created_at: f64,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl JobDescriptor {
    /// Descriptor for `class` with a fresh jid, created now.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            jid: Uuid::now_v7().simple().to_string(),
            queue: None,
            class: class.into(),
            wrapped: None,
            created_at: SystemClock.now(),
            extra: Map::new(),
        }
    }

    pub fn for_job<J: JobClass>() -> Self {
        Self::new(J::CLASS_NAME)
    }

    /// Parse a JSON job payload.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    pub fn with_jid(mut self, jid: impl Into<String>) -> Self {
        self.jid = jid.into();
        self
    }

    pub fn with_queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = Some(queue.into());
        self
    }

    pub fn with_created_at(mut self, created_at: f64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Wrap the current class in an adapter: `class` becomes `adapter` and the
    /// previous class moves to `wrapped`.
    pub fn wrapped_by(mut self, adapter: impl Into<String>) -> Self {
        let original = std::mem::replace(&mut self.class, adapter.into());
        self.wrapped = Some(original);
        self
    }

    /// The job's true class name: `wrapped` when present and non-empty,
    /// otherwise `class`.
    pub fn effective_class(&self) -> &str {
        match self.wrapped.as_deref() {
            Some(wrapped) if !wrapped.is_empty() => wrapped,
            _ => &self.class,
        }
    }
}
