//! Synchronous job runner wired through the instrumentation middleware.

use std::collections::HashMap;

use anyhow::Context;
use tracing::{debug, warn};

use jobmeter_core::{JobClass, JobDescriptor, JobError};
use jobmeter_events::MetricsSink;

use crate::context::WorkerContext;
use crate::instrumentation::InstrumentationMiddleware;

/// Job handler function type.
pub type JobHandler = Box<dyn Fn(&JobDescriptor) -> anyhow::Result<()> + Send + Sync>;

/// Queue name used when a descriptor carries none.
pub const DEFAULT_QUEUE: &str = "default";

/// Runs job descriptors with registered handlers.
///
/// Handlers are keyed by effective class name, so jobs wrapped by an adapter
/// are dispatched to the real class. Every execution goes through the
/// instrumentation middleware, including jobs that have no handler (they are
/// recorded as `error` events).
pub struct JobRunner<S: MetricsSink> {
    middleware: InstrumentationMiddleware<S>,
    handlers: HashMap<String, JobHandler>,
}

impl<S: MetricsSink> JobRunner<S> {
    pub fn new(middleware: InstrumentationMiddleware<S>) -> Self {
        Self {
            middleware,
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for a class name (`"*"` catches every class).
    pub fn register_handler<F>(&mut self, class_name: impl Into<String>, handler: F)
    where
        F: Fn(&JobDescriptor) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handlers.insert(class_name.into(), Box::new(handler));
    }

    pub fn register_job<J, F>(&mut self, handler: F)
    where
        J: JobClass,
        F: Fn(&JobDescriptor) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register_handler(J::CLASS_NAME, handler);
    }

    pub fn middleware(&self) -> &InstrumentationMiddleware<S> {
        &self.middleware
    }

    fn get_handler(&self, class_name: &str) -> Option<&JobHandler> {
        self.handlers
            .get(class_name)
            .or_else(|| self.handlers.get("*"))
    }

    /// Execute a single job and return the handler's outcome.
    pub fn execute_one(&self, ctx: &WorkerContext, job: &JobDescriptor) -> anyhow::Result<()> {
        let queue = job.queue.as_deref().unwrap_or(DEFAULT_QUEUE);

        let result = self.middleware.call(ctx, job, queue, || -> anyhow::Result<()> {
            let class = job.effective_class();
            let handler = self.get_handler(class).ok_or_else(|| {
                JobError::raised("NoHandlerError", format!("no handler for job class: {class}"))
            })?;
            handler(job)
        });

        match &result {
            Ok(()) => debug!(jid = %job.jid, "job completed successfully"),
            Err(e) => warn!(jid = %job.jid, error = %e, "job execution failed"),
        }

        result
    }

    /// Parse a JSON job payload and execute it.
    pub fn execute_payload(&self, ctx: &WorkerContext, payload: &str) -> anyhow::Result<()> {
        let job = JobDescriptor::from_json(payload).context("invalid job payload")?;
        self.execute_one(ctx, &job)
    }
}
