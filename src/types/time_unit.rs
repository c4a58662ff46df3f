//! Interval units for rate limit configuration.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SubmitError;

/// Unit of the rate limiting interval.
///
/// A limiter configured with a unit admits its request limit once per
/// single unit, e.g. `TimeUnit::Seconds` means "per second".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// One nanosecond
    Nanoseconds,
    /// One microsecond
    Microseconds,
    /// One millisecond
    Milliseconds,
    /// One second (default)
    #[default]
    Seconds,
    /// One minute
    Minutes,
    /// One hour
    Hours,
    /// One day
    Days,
}

impl TimeUnit {
    /// Length of one unit.
    pub fn to_duration(self) -> Duration {
        match self {
            TimeUnit::Nanoseconds => Duration::from_nanos(1),
            TimeUnit::Microseconds => Duration::from_micros(1),
            TimeUnit::Milliseconds => Duration::from_millis(1),
            TimeUnit::Seconds => Duration::from_secs(1),
            TimeUnit::Minutes => Duration::from_secs(60),
            TimeUnit::Hours => Duration::from_secs(60 * 60),
            TimeUnit::Days => Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Length of one unit in whole milliseconds, never less than 1.
    ///
    /// Window accounting is done in milliseconds, so sub-millisecond units
    /// are rounded up.
    pub fn to_millis(self) -> u64 {
        u64::try_from(self.to_duration().as_millis())
            .unwrap_or(u64::MAX)
            .max(1)
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TimeUnit::Nanoseconds => "nanoseconds",
            TimeUnit::Microseconds => "microseconds",
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TimeUnit {
    type Err = SubmitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ns" | "nanosecond" | "nanoseconds" => Ok(TimeUnit::Nanoseconds),
            "us" | "microsecond" | "microseconds" => Ok(TimeUnit::Microseconds),
            "ms" | "millisecond" | "milliseconds" => Ok(TimeUnit::Milliseconds),
            "s" | "sec" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "m" | "min" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "h" | "hour" | "hours" => Ok(TimeUnit::Hours),
            "d" | "day" | "days" => Ok(TimeUnit::Days),
            other => Err(SubmitError::InvalidConfiguration(format!(
                "unknown time unit: {other:?}"
            ))),
        }
    }
}
