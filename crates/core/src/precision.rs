//! Time precision of emitted timestamps.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Unit in which a metrics backend expects point timestamps.
///
/// Symbols follow the backend convention: `h`, `m`, `s`, `ms`, `u`, `ns`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Precision {
    Hours,
    Minutes,
    #[default]
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl Precision {
    pub const ALL: [Precision; 6] = [
        Precision::Hours,
        Precision::Minutes,
        Precision::Seconds,
        Precision::Milliseconds,
        Precision::Microseconds,
        Precision::Nanoseconds,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Precision::Hours => "h",
            Precision::Minutes => "m",
            Precision::Seconds => "s",
            Precision::Milliseconds => "ms",
            Precision::Microseconds => "u",
            Precision::Nanoseconds => "ns",
        }
    }

    /// Convert fractional epoch seconds into an integer timestamp.
    ///
    /// Sub-second precisions scale the value and truncate toward zero. Hour and
    /// minute precision truncate to the start of the enclosing hour/minute and
    /// keep the result in epoch seconds, so `1234567890.5` becomes `1234566000`
    /// for `h` and `1234567860` for `m`.
    ///
    /// Nanosecond timestamps go through `f64`, so the lowest digits carry its
    /// rounding error.
    pub fn convert(&self, epoch_secs: f64) -> i64 {
        match self {
            Precision::Hours => truncate_to_multiple(epoch_secs, 3600),
            Precision::Minutes => truncate_to_multiple(epoch_secs, 60),
            Precision::Seconds => epoch_secs.trunc() as i64,
            Precision::Milliseconds => (epoch_secs * 1_000.0).trunc() as i64,
            Precision::Microseconds => (epoch_secs * 1_000_000.0).trunc() as i64,
            Precision::Nanoseconds => (epoch_secs * 1_000_000_000.0).trunc() as i64,
        }
    }
}

fn truncate_to_multiple(epoch_secs: f64, unit_secs: i64) -> i64 {
    let units = (epoch_secs / unit_secs as f64).trunc() as i64;
    units * unit_secs
}

impl core::fmt::Display for Precision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Precision {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" => Ok(Precision::Hours),
            "m" => Ok(Precision::Minutes),
            "s" => Ok(Precision::Seconds),
            "ms" => Ok(Precision::Milliseconds),
            "u" => Ok(Precision::Microseconds),
            "ns" => Ok(Precision::Nanoseconds),
            other => Err(ConfigError::unsupported_precision(other)),
        }
    }
}

impl TryFrom<String> for Precision {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Precision> for String {
    fn from(value: Precision) -> Self {
        value.symbol().to_string()
    }
}
