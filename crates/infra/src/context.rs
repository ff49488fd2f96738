/// Worker context for one job execution.
///
/// Identifies the worker running the job; used for log correlation only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerContext {
    worker_id: String,
}

impl WorkerContext {
    pub fn new(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
        }
    }

    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }
}

impl Default for WorkerContext {
    fn default() -> Self {
        Self::new("worker-0")
    }
}
