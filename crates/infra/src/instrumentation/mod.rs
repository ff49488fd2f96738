//! Job instrumentation: timing and start/finish/error events per execution.
//!
//! ## Flow
//!
//! ```text
//! job queue → InstrumentationMiddleware::call → job body
//!                      │
//!                      └─ MetricsSink::write_point (start, then finish xor error)
//! ```
//!
//! - Excluded classes run untouched: no clock reads, no events.
//! - Every other execution emits at most one `start` event and exactly one
//!   terminal event.
//! - Job errors are recorded and returned unchanged.

pub mod config;
pub mod exclusions;
pub mod middleware;

pub use config::{DEFAULT_SERIES_NAME, InstrumentationConfig, StartEventFailure};
pub use exclusions::ExcludedClasses;
pub use middleware::InstrumentationMiddleware;
