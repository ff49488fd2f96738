//! In-memory metrics sink for tests/dev.

use std::sync::Mutex;

use jobmeter_core::{Precision, SinkError};

use crate::point::{EventPhase, Point};
use crate::sink::MetricsSink;

/// Arguments of one `write_point` call, as received.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteCall {
    pub series: String,
    pub point: Point,
    pub precision: Precision,
    pub retention_policy: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum FailOn {
    Never,
    Phase(EventPhase),
    Always,
}

/// Recording sink.
///
/// - No IO
/// - Records every call in order, including rejected ones
/// - Optional failure injection per event phase
#[derive(Debug)]
pub struct InMemorySink {
    precision: Precision,
    fail_on: FailOn,
    calls: Mutex<Vec<WriteCall>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Reject writes whose `event` tag matches `phase`.
    pub fn failing_on(mut self, phase: EventPhase) -> Self {
        self.fail_on = FailOn::Phase(phase);
        self
    }

    /// Reject every write.
    pub fn failing(mut self) -> Self {
        self.fail_on = FailOn::Always;
        self
    }

    /// Snapshot of all calls received so far.
    pub fn calls(&self) -> Vec<WriteCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Points written so far, in order.
    pub fn points(&self) -> Vec<Point> {
        self.calls().into_iter().map(|c| c.point).collect()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    fn rejects(&self, point: &Point) -> bool {
        match self.fail_on {
            FailOn::Never => false,
            FailOn::Always => true,
            FailOn::Phase(phase) => point.phase() == Some(phase),
        }
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            fail_on: FailOn::Never,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MetricsSink for InMemorySink {
    fn time_precision(&self) -> Precision {
        self.precision
    }

    fn write_point(
        &self,
        series: &str,
        point: Point,
        precision: Precision,
        retention_policy: Option<&str>,
    ) -> Result<(), SinkError> {
        let rejected = self.rejects(&point);

        let mut calls = self.calls.lock().map_err(|_| SinkError::Poisoned)?;
        calls.push(WriteCall {
            series: series.to_string(),
            point,
            precision,
            retention_policy: retention_policy.map(str::to_string),
        });

        if rejected {
            tracing::trace!(series, "in-memory sink rejecting write");
            return Err(SinkError::write("injected failure"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase_point(timestamp: i64, phase: EventPhase) -> Point {
        Point::new(timestamp).with_tag("event", phase.as_str())
    }

    #[test]
    fn records_calls_in_order() {
        let sink = InMemorySink::new().with_precision(Precision::Milliseconds);
        assert_eq!(sink.time_precision(), Precision::Milliseconds);

        let start = phase_point(1, EventPhase::Start);
        let finish = phase_point(2, EventPhase::Finish);
        sink.write_point("jobs", start, Precision::Milliseconds, None).unwrap();
        sink.write_point("jobs", finish, Precision::Milliseconds, Some("weekly")).unwrap();

        let calls = sink.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].point.timestamp, 1);
        assert_eq!(calls[1].retention_policy.as_deref(), Some("weekly"));
        assert_eq!(calls[1].series, "jobs");
    }

    #[test]
    fn injected_failure_only_hits_matching_phase() {
        let sink = InMemorySink::new().failing_on(EventPhase::Start);

        let start = phase_point(1, EventPhase::Start);
        let finish = phase_point(2, EventPhase::Finish);
        let start = sink.write_point("jobs", start, Precision::Seconds, None);
        let finish = sink.write_point("jobs", finish, Precision::Seconds, None);

        assert_eq!(start, Err(SinkError::write("injected failure")));
        assert!(finish.is_ok());
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn failing_sink_rejects_everything() {
        let sink = InMemorySink::new().failing();
        assert!(sink.write_point("jobs", Point::new(1), Precision::Seconds, None).is_err());

        sink.clear();
        assert!(sink.is_empty());
    }
}
