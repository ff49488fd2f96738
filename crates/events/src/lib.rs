//! Emitted event records and the metrics-sink seam.

pub mod in_memory_sink;
pub mod point;
pub mod sink;

pub use in_memory_sink::{InMemorySink, WriteCall};
pub use point::{EventPhase, FieldValue, Point};
pub use sink::MetricsSink;
