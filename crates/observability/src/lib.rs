//! Tracing, logging, and a log-backed metrics sink.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Metrics sinks that write to the log stream.
pub mod metrics;

pub use metrics::LogSink;
