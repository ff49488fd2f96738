//! `jobmeter-core` — primitives shared by the instrumentation layer.
//!
//! This crate contains **pure** building blocks (no sinks, no logging setup):
//! job descriptors, job-class identity, time precision and the clock seam.

pub mod clock;
pub mod descriptor;
pub mod error;
pub mod precision;

pub use clock::{Clock, SystemClock};
pub use descriptor::{JobClass, JobDescriptor};
pub use error::{ConfigError, ErrorClass, JobError, SinkError};
pub use precision::Precision;
