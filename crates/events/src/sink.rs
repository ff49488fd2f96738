//! Metrics sink abstraction (write side only).
//!
//! A sink is the client of a time-series backend. The instrumentation layer
//! hands it one point per call and never batches, buffers or retries; those
//! concerns (and the wire protocol, transport and authentication) belong to
//! the implementation.

use std::sync::Arc;

use jobmeter_core::{Precision, SinkError};

use crate::point::Point;

/// Destination for emitted points.
///
/// ## Precision
///
/// The sink owns the timestamp precision of its backend. Callers read it via
/// [`MetricsSink::time_precision`], convert timestamps accordingly, and pass
/// the same precision back on every write.
///
/// ## Errors
///
/// `write_point()` may block on I/O and may fail. Failures surface to the
/// caller unchanged; timeouts and cancellation are the sink's own policy.
///
/// ## Thread Safety
///
/// Requires `Send + Sync`: the same sink serves every worker thread.
pub trait MetricsSink: Send + Sync {
    fn time_precision(&self) -> Precision;

    fn write_point(
        &self,
        series: &str,
        point: Point,
        precision: Precision,
        retention_policy: Option<&str>,
    ) -> Result<(), SinkError>;
}

impl<S> MetricsSink for Arc<S>
where
    S: MetricsSink + ?Sized,
{
    fn time_precision(&self) -> Precision {
        (**self).time_precision()
    }

    fn write_point(
        &self,
        series: &str,
        point: Point,
        precision: Precision,
        retention_policy: Option<&str>,
    ) -> Result<(), SinkError> {
        (**self).write_point(series, point, precision, retention_policy)
    }
}
