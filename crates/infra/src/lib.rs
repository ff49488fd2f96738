//! Instrumentation layer: middleware, configuration and a job runner.

pub mod context;
pub mod instrumentation;
pub mod runner;


pub use context::WorkerContext;
pub use instrumentation::{
    DEFAULT_SERIES_NAME, ExcludedClasses, InstrumentationConfig, InstrumentationMiddleware,
    StartEventFailure,
};
pub use runner::{JobHandler, JobRunner};
