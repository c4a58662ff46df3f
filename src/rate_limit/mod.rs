//! Client-side request rate limiting.
//!
//! The document service accepts a bounded number of requests per interval.
//! Every submission takes a permit from a shared [`FixedWindowLimiter`]
//! before anything is sent; when no permit is available the call fails
//! immediately instead of waiting.
//!
//! ## Example
//!
//! ```rust
//! use document_submit_client::rate_limit::{FixedWindowLimiter, RateLimitConfig};
//! use document_submit_client::types::TimeUnit;
//!
//! // Nine requests per second
//! let limiter = FixedWindowLimiter::new(RateLimitConfig::per(TimeUnit::Seconds, 9)).unwrap();
//! for _ in 0..9 {
//!     assert!(limiter.try_acquire());
//! }
//! assert!(!limiter.try_acquire());
//! ```

mod clock;
mod window;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use window::{FixedWindowLimiter, Window};

use std::time::Duration;

use crate::error::SubmitError;
use crate::types::TimeUnit;

/// Rate limiter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum permits per interval.
    pub limit: u32,
    /// Length of one window.
    pub interval: Duration,
}

impl RateLimitConfig {
    /// Create a configuration from a limit and an interval.
    pub fn new(limit: u32, interval: Duration) -> Self {
        Self { limit, interval }
    }

    /// `limit` requests per one `unit`.
    pub fn per(unit: TimeUnit, limit: u32) -> Self {
        Self {
            limit,
            interval: Duration::from_millis(unit.to_millis()),
        }
    }

    /// Interval in whole milliseconds, saturating at `u64::MAX`.
    pub fn interval_millis(&self) -> u64 {
        u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX)
    }

    /// Check that both the limit and the interval are positive.
    pub fn validate(&self) -> Result<(), SubmitError> {
        if self.limit == 0 {
            return Err(SubmitError::InvalidConfiguration(
                "request limit must be positive".to_string(),
            ));
        }
        if self.interval_millis() == 0 {
            return Err(SubmitError::InvalidConfiguration(
                "rate limit interval must be at least one millisecond".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::per(TimeUnit::Seconds, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_unit() {
        let config = RateLimitConfig::per(TimeUnit::Minutes, 30);
        assert_eq!(config.limit, 30);
        assert_eq!(config.interval_millis(), 60_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(RateLimitConfig::new(0, Duration::from_secs(1)).validate().is_err());
        assert!(RateLimitConfig::new(1, Duration::from_micros(500)).validate().is_err());
        // Sub-millisecond units are rounded up and stay valid
        assert!(RateLimitConfig::per(TimeUnit::Nanoseconds, 1).validate().is_ok());
    }

    #[test]
    fn test_interval_millis_saturates() {
        let config = RateLimitConfig::new(1, Duration::from_secs(18_446_744_073_709_552));
        assert_eq!(config.interval_millis(), u64::MAX);
        assert!(config.validate().is_ok());

        let config = RateLimitConfig::new(1, Duration::MAX);
        assert_eq!(config.interval_millis(), u64::MAX);
    }
}
