//! Instrumentation middleware.

use tracing::{debug, error, warn};

use jobmeter_core::{Clock, ConfigError, ErrorClass, JobDescriptor, SinkError, SystemClock};
use jobmeter_events::{EventPhase, MetricsSink, Point};

use super::config::{InstrumentationConfig, StartEventFailure};
use crate::context::WorkerContext;

/// Timing values carried by an event.
#[derive(Debug, Copy, Clone)]
struct Timings {
    creation_time: f64,
    waited: f64,
    /// `(worked, total)`, terminal events only.
    elapsed: Option<(f64, f64)>,
}

/// Wraps one job execution with timing and event emission.
///
/// Holds no mutable state after construction; one instance serves every
/// worker thread as long as the sink and clock are thread-safe (both traits
/// require `Send + Sync`).
pub struct InstrumentationMiddleware<S> {
    sink: S,
    config: InstrumentationConfig,
    clock: Box<dyn Clock>,
}

impl<S: MetricsSink> InstrumentationMiddleware<S> {
    /// Build a middleware writing to `sink`, using the wall clock.
    pub fn new(sink: S, config: InstrumentationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sink,
            config,
            clock: Box::new(SystemClock),
        })
    }

    /// Replace the time source (deterministic clocks in tests).
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &InstrumentationConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run `next` (the job body) under instrumentation.
    ///
    /// - Excluded classes: `next` runs and its result is returned as-is.
    /// - Otherwise: optional `start` event, then `next`, then exactly one
    ///   `finish` or `error` event.
    ///
    /// The job's error value is returned unchanged after the `error` event is
    /// written. A sink failure on the terminal write is returned as `E` when
    /// the job succeeded, and only logged when the job already failed. A sink
    /// failure on the `start` write follows [`StartEventFailure`].
    pub fn call<T, E, F>(
        &self,
        ctx: &WorkerContext,
        job: &JobDescriptor,
        queue: &str,
        next: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: ErrorClass + From<SinkError>,
    {
        let class = job.effective_class();
        let span = tracing::debug_span!(
            "instrument_job",
            worker = %ctx.worker_id(),
            jid = %job.jid,
            class,
            queue,
        );
        let _guard = span.enter();

        if self.config.except.contains(class) {
            debug!("class excluded from instrumentation");
            return next();
        }

        let creation_time = job.created_at;
        let started = self.clock.now();
        let waited = started - creation_time;

        let mut timings = Timings {
            creation_time,
            waited,
            elapsed: None,
        };

        if self.config.start_events {
            if let Err(e) = self.emit(job, EventPhase::Start, started, &timings, None) {
                match self.config.start_failure {
                    StartEventFailure::Abort => return Err(E::from(e)),
                    StartEventFailure::Continue => {
                        warn!(error = %e, "start event write failed; running job anyway");
                    }
                }
            }
        }

        let result = next();

        let finished = self.clock.now();
        let worked = finished - started;
        timings.elapsed = Some((worked, waited + worked));

        match result {
            Ok(value) => {
                self.emit(job, EventPhase::Finish, finished, &timings, None)
                    .map_err(E::from)?;
                Ok(value)
            }
            Err(job_error) => {
                let error_class = job_error.error_class();
                if let Err(e) =
                    self.emit(job, EventPhase::Error, finished, &timings, Some(&error_class))
                {
                    error!(error = %e, job_error = %error_class, "error event write failed");
                }
                Err(job_error)
            }
        }
    }

    fn emit(
        &self,
        job: &JobDescriptor,
        phase: EventPhase,
        at: f64,
        timings: &Timings,
        error_class: Option<&str>,
    ) -> Result<(), SinkError> {
        let precision = self.sink.time_precision();
        let point = self.build_point(job, phase, precision.convert(at), timings, error_class);

        debug!(event = %phase, timestamp = point.timestamp, %precision, "writing job event");

        self.sink.write_point(
            &self.config.series_name,
            point,
            precision,
            self.config.retention_policy.as_deref(),
        )
    }

    /// Static tags go in first; computed tags overwrite them on collision.
    fn build_point(
        &self,
        job: &JobDescriptor,
        phase: EventPhase,
        timestamp: i64,
        timings: &Timings,
        error_class: Option<&str>,
    ) -> Point {
        let mut point = Point::new(timestamp);
        point.tags = self.config.tags.clone();

        if let Some(queue) = &job.queue {
            point.tags.insert("queue".to_string(), queue.clone());
        }
        point
            .tags
            .insert("class".to_string(), job.effective_class().to_string());
        point
            .tags
            .insert("event".to_string(), phase.as_str().to_string());
        if let Some(error_class) = error_class {
            point
                .tags
                .insert("error".to_string(), error_class.to_string());
        }

        point = point
            .with_value("jid", job.jid.as_str())
            .with_value("creation_time", timings.creation_time)
            .with_value("waited", timings.waited);

        if let Some((worked, total)) = timings.elapsed {
            point = point.with_value("worked", worked).with_value("total", total);
        }

        point
    }
}
