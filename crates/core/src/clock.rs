//! Time source seam.

use chrono::{DateTime, Utc};

/// Zero-argument time source returning fractional epoch seconds.
///
/// Injected into the instrumentation middleware so tests can drive it with a
/// deterministic sequence of readings. Implementations must be safe to share
/// across worker threads.
pub trait Clock: Send + Sync {
    fn now(&self) -> f64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Copy, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        epoch_secs(Utc::now())
    }
}

impl<F> Clock for F
where
    F: Fn() -> f64 + Send + Sync,
{
    fn now(&self) -> f64 {
        self()
    }
}

/// Fractional epoch seconds of a UTC instant.
pub fn epoch_secs(at: DateTime<Utc>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) / 1_000_000_000.0
}
