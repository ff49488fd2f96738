use jobmeter_core::{Precision, SinkError};
use jobmeter_events::{MetricsSink, Point};

/// Metrics sink that writes each point to the log stream.
///
/// Useful when no time-series backend is configured: points show up as
/// structured `info` events under the `jobmeter::points` target. Never fails.
#[derive(Debug, Copy, Clone, Default)]
pub struct LogSink {
    precision: Precision,
}

impl LogSink {
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }
}

impl MetricsSink for LogSink {
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
        let tags = serde_json::to_string(&point.tags).unwrap_or_default();
        let values = serde_json::to_string(&point.values).unwrap_or_default();

        tracing::info!(
            target: "jobmeter::points",
            series,
            timestamp = point.timestamp,
            %precision,
            retention_policy = retention_policy.unwrap_or(""),
            tags = %tags,
            values = %values,
            "point"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_sink_reports_configured_precision() {
        assert_eq!(LogSink::default().time_precision(), Precision::Seconds);
        assert_eq!(
            LogSink::new(Precision::Microseconds).time_precision(),
            Precision::Microseconds
        );
    }

    #[test]
    fn log_sink_accepts_every_point() {
        let sink = LogSink::new(Precision::Milliseconds);
        let point = Point::new(1_000)
            .with_tag("event", "finish")
            .with_value("jid", "abc")
            .with_value("total", 1.5);

        assert!(sink
            .write_point("sidekiq_jobs", point, Precision::Milliseconds, Some("weekly"))
            .is_ok());
    }
}
