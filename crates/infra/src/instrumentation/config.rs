//! Instrumentation settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use jobmeter_core::{ConfigError, JobClass};

use super::exclusions::ExcludedClasses;

/// Series written to when none is configured.
pub const DEFAULT_SERIES_NAME: &str = "sidekiq_jobs";

/// What to do when the `start` write fails before the job body runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartEventFailure {
    /// Return the sink error; the job body never runs.
    #[default]
    Abort,
    /// Log the failure and run the job anyway.
    Continue,
}

/// Instrumentation configuration.
///
/// Immutable once handed to the middleware. Every field has a default, so an
/// empty document (`{}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentationConfig {
    /// Emit a `start` event in addition to `finish`/`error`.
    pub start_events: bool,
    /// Destination series.
    pub series_name: String,
    /// Passed through to every write.
    pub retention_policy: Option<String>,
    /// Static tags merged into every event. Computed tags win on collision.
    pub tags: BTreeMap<String, String>,
    /// Classes that are executed without instrumentation.
    pub except: ExcludedClasses,
    pub start_failure: StartEventFailure,
}

impl Default for InstrumentationConfig {
    fn default() -> Self {
        Self {
            start_events: true,
            series_name: DEFAULT_SERIES_NAME.to_string(),
            retention_policy: None,
            tags: BTreeMap::new(),
            except: ExcludedClasses::new(),
            start_failure: StartEventFailure::default(),
        }
    }
}

impl InstrumentationConfig {
    pub fn with_start_events(mut self, enabled: bool) -> Self {
        self.start_events = enabled;
        self
    }

    pub fn with_series_name(mut self, name: impl Into<String>) -> Self {
        self.series_name = name.into();
        self
    }

    pub fn with_retention_policy(mut self, policy: impl Into<String>) -> Self {
        self.retention_policy = Some(policy.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_tags<K, V>(mut self, tags: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.tags
            .extend(tags.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Exclude classes by name.
    pub fn except<S: Into<String>>(mut self, class_names: impl IntoIterator<Item = S>) -> Self {
        self.except.extend(class_names);
        self
    }

    /// Exclude a class by type.
    pub fn except_job<J: JobClass>(mut self) -> Self {
        self.except.insert_job::<J>();
        self
    }

    pub fn with_start_failure(mut self, policy: StartEventFailure) -> Self {
        self.start_failure = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.series_name.trim().is_empty() {
            return Err(ConfigError::EmptySeriesName);
        }

        if self.tags.keys().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::invalid_tag("tag keys must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cleanup;

    impl JobClass for Cleanup {
        const CLASS_NAME: &'static str = "Cleanup";
    }

    #[test]
    fn defaults() {
        let config = InstrumentationConfig::default();
        assert!(config.start_events);
        assert_eq!(config.series_name, "sidekiq_jobs");
        assert!(config.retention_policy.is_none());
        assert!(config.tags.is_empty());
        assert!(config.except.is_empty());
        assert_eq!(config.start_failure, StartEventFailure::Abort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        let config: InstrumentationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, InstrumentationConfig::default());
    }

    #[test]
    fn deserializes_full_document() {
        let config: InstrumentationConfig = serde_json::from_str(
            r#"{
                "start_events": false,
                "series_name": "jobs",
                "retention_policy": "weekly",
                "tags": {"app": "billing"},
                "except": "Cleanup",
                "start_failure": "continue"
            }"#,
        )
        .unwrap();

        assert!(!config.start_events);
        assert_eq!(config.series_name, "jobs");
        assert_eq!(config.retention_policy.as_deref(), Some("weekly"));
        assert_eq!(config.tags.get("app").map(String::as_str), Some("billing"));
        assert!(config.except.contains("Cleanup"));
        assert_eq!(config.start_failure, StartEventFailure::Continue);
    }

    #[test]
    fn builder_mixes_types_and_names() {
        let config = InstrumentationConfig::default()
            .except_job::<Cleanup>()
            .except(["Cleanup", "Reindex"]);

        assert_eq!(config.except.len(), 2);
    }

    #[test]
    fn validation_rejects_empty_series_and_tag_keys() {
        let err = InstrumentationConfig::default()
            .with_series_name("  ")
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptySeriesName);

        let err = InstrumentationConfig::default()
            .with_tag("", "x")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTag(_)));
    }
}
