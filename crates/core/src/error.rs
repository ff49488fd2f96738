//! Error model.

use thiserror::Error;

/// Configuration/validation failure.
///
/// Raised while building or validating instrumentation settings. Kept separate
/// from data errors so a misconfigured deployment fails fast instead of
/// silently falling back to defaults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The time precision symbol is not one of `h`, `m`, `s`, `ms`, `u`, `ns`.
    #[error("unsupported time precision: {0:?}")]
    UnsupportedPrecision(String),

    /// The destination series name is empty.
    #[error("series name must not be empty")]
    EmptySeriesName,

    /// A static tag is malformed (e.g. empty key).
    #[error("invalid tag: {0}")]
    InvalidTag(String),
}

impl ConfigError {
    pub fn unsupported_precision(symbol: impl Into<String>) -> Self {
        Self::UnsupportedPrecision(symbol.into())
    }

    pub fn invalid_tag(msg: impl Into<String>) -> Self {
        Self::InvalidTag(msg.into())
    }
}

/// Failure reported by a metrics sink while writing a point.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The write was rejected or could not be delivered.
    #[error("metrics write failed: {0}")]
    Write(String),

    /// Internal lock poisoning.
    #[error("metrics sink lock poisoned")]
    Poisoned,
}

impl SinkError {
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }
}

/// Failure raised by a job body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobError {
    /// The job failed with an explicit error class (e.g. `ArgumentError`).
    #[error("{class}: {message}")]
    Raised { class: String, message: String },

    /// A metrics write failed while the job was being processed.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl JobError {
    pub fn raised(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Raised {
            class: class.into(),
            message: message.into(),
        }
    }
}

/// Name of an error's type, as reported in the `error` tag of an error event.
pub trait ErrorClass {
    fn error_class(&self) -> String;
}

/// Final path segment of a type name, without generic parameters.
///
/// `jobmeter_core::error::SinkError` becomes `SinkError`.
pub fn type_class<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

impl ErrorClass for ConfigError {
    fn error_class(&self) -> String {
        type_class::<Self>()
    }
}

impl ErrorClass for SinkError {
    fn error_class(&self) -> String {
        type_class::<Self>()
    }
}

impl ErrorClass for JobError {
    fn error_class(&self) -> String {
        match self {
            JobError::Raised { class, .. } => class.clone(),
            JobError::Sink(e) => e.error_class(),
        }
    }
}

impl ErrorClass for anyhow::Error {
    /// Walks the cause chain and reports the first error of a known type.
    ///
    /// Context layers are skipped. Without a known type, the root cause's
    /// `Debug` output names it (`ParseIntError { kind: InvalidDigit }` gives
    /// `ParseIntError`); plain messages report `Error`.
    fn error_class(&self) -> String {
        self.chain()
            .find_map(known_class)
            .or_else(|| debug_class(self.root_cause()))
            .unwrap_or_else(|| "Error".to_string())
    }
}

/// Leading identifier of an error's `Debug` output, if it starts with one.
fn debug_class(err: &(dyn std::error::Error + 'static)) -> Option<String> {
    let rendered = format!("{err:?}");
    let head = rendered
        .split(|c: char| c == '{' || c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default();

    let mut chars = head.chars();
    let starts_like_ident = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_');
    let is_ident = starts_like_ident && chars.all(|c| c.is_alphanumeric() || c == '_');

    is_ident.then(|| head.to_string())
}

fn known_class(err: &(dyn std::error::Error + 'static)) -> Option<String> {
    if let Some(e) = err.downcast_ref::<JobError>() {
        return Some(e.error_class());
    }
    if let Some(e) = err.downcast_ref::<SinkError>() {
        return Some(e.error_class());
    }
    err.downcast_ref::<ConfigError>().map(ErrorClass::error_class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn raised_error_reports_its_class() {
        let err = JobError::raised("ArgumentError", "bad input");
        assert_eq!(err.error_class(), "ArgumentError");
        assert_eq!(err.to_string(), "ArgumentError: bad input");
    }

    #[test]
    fn sink_errors_report_type_name() {
        assert_eq!(SinkError::write("down").error_class(), "SinkError");
        assert_eq!(JobError::from(SinkError::Poisoned).error_class(), "SinkError");
        assert_eq!(ConfigError::EmptySeriesName.error_class(), "ConfigError");
    }

    #[test]
    fn anyhow_error_uses_first_known_cause() {
        let err = anyhow::Error::from(JobError::raised("Timeout", "took too long"));
        assert_eq!(err.error_class(), "Timeout");

        let wrapped: anyhow::Result<()> =
            Err(JobError::raised("Timeout", "took too long")).context("while syncing");
        assert_eq!(wrapped.unwrap_err().error_class(), "Timeout");
    }

    #[test]
    fn anyhow_error_names_foreign_root_cause() {
        let parse_err = "abc".parse::<i32>().unwrap_err();
        let err = anyhow::Error::from(parse_err);
        assert_eq!(err.error_class(), "ParseIntError");

        let wrapped: anyhow::Result<i32> = "abc".parse::<i32>().context("reading batch size");
        assert_eq!(wrapped.unwrap_err().error_class(), "ParseIntError");
    }

    #[test]
    fn anyhow_error_without_known_cause_is_generic() {
        let err = anyhow::anyhow!("something broke");
        assert_eq!(err.error_class(), "Error");
    }

    #[test]
    fn type_class_strips_path_and_generics() {
        assert_eq!(type_class::<SinkError>(), "SinkError");
        assert_eq!(type_class::<Vec<SinkError>>(), "Vec");
    }
}
