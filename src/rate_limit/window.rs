//! Lock-free fixed window rate limiter.
//!
//! State is a single immutable [`Window`] snapshot published through an
//! [`ArcSwap`]. Every admission either observes a saturated window and
//! returns without writing, or publishes a successor snapshot with a
//! compare-and-swap against the exact snapshot it evaluated. A failed swap
//! means another caller moved the state first, so the decision is re-made
//! from a fresh read.
//!
//! The window is anchored on the first request admitted after expiry rather
//! than on clock boundaries. Bursts of up to twice the limit are therefore
//! possible across a window edge.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use document_submit_client::rate_limit::{FixedWindowLimiter, RateLimitConfig};
//!
//! let limiter = FixedWindowLimiter::new(RateLimitConfig::new(2, Duration::from_secs(1))).unwrap();
//! assert!(limiter.try_acquire());
//! assert!(limiter.try_acquire());
//! assert!(!limiter.try_acquire());
//! ```

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;

use crate::Result;
use crate::rate_limit::RateLimitConfig;
use crate::rate_limit::clock::{Clock, MonotonicClock};

/// Snapshot of limiter state.
///
/// Never mutated after publication; each transition creates a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Clock reading (ms) of the request that opened this window
    pub window_start: u64,
    /// Permits granted in this window
    pub count: u32,
}

impl Window {
    fn is_current(&self, now: u64, interval_ms: u64) -> bool {
        now.saturating_sub(self.window_start) < interval_ms
    }
}

/// Admits at most `limit` calls per interval without locking.
pub struct FixedWindowLimiter {
    config: RateLimitConfig,
    interval_ms: u64,
    state: ArcSwap<Window>,
    clock: Arc<dyn Clock>,
}

impl FixedWindowLimiter {
    /// Create a limiter using a [`MonotonicClock`].
    pub fn new(config: RateLimitConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(MonotonicClock::new()))
    }

    /// Create a limiter reading time from `clock`.
    pub fn with_clock(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let interval_ms = config.interval_millis();
        let window = Window {
            window_start: clock.now_millis(),
            count: 0,
        };

        Ok(Self {
            config,
            interval_ms,
            state: ArcSwap::from_pointee(window),
            clock,
        })
    }

    /// Try to take one permit.
    ///
    /// Returns `true` if the call is admitted, `false` if the current window
    /// is already saturated. Never blocks and never fails.
    pub fn try_acquire(&self) -> bool {
        loop {
            let current = self.state.load();
            let now = self.clock.now_millis();

            let next = if !current.is_current(now, self.interval_ms) {
                Window {
                    window_start: now,
                    count: 1,
                }
            } else if current.count >= self.config.limit {
                tracing::debug!(
                    limit = self.config.limit,
                    window_start = current.window_start,
                    "rate limit window saturated"
                );
                return false;
            } else {
                Window {
                    window_start: current.window_start,
                    count: current.count + 1,
                }
            };

            let previous = self.state.compare_and_swap(&current, Arc::new(next));
            if Arc::ptr_eq(&*previous, &*current) {
                if next.count == 1 {
                    tracing::trace!(
                        window_start = next.window_start,
                        "opened new rate limit window"
                    );
                }
                return true;
            }
            // Another caller published first; re-evaluate against its state.
        }
    }

    /// Copy of the current window snapshot.
    pub fn window(&self) -> Window {
        **self.state.load()
    }

    /// Permits still available before the window saturates.
    pub fn remaining(&self) -> u32 {
        let window = self.state.load();
        if window.is_current(self.clock.now_millis(), self.interval_ms) {
            self.config.limit.saturating_sub(window.count)
        } else {
            self.config.limit
        }
    }

    /// Time until the current window expires, or `None` if it already has.
    pub fn time_until_reset(&self) -> Option<Duration> {
        let window = self.state.load();
        let elapsed = self.clock.now_millis().saturating_sub(window.window_start);
        if elapsed >= self.interval_ms {
            None
        } else {
            Some(Duration::from_millis(self.interval_ms - elapsed))
        }
    }

    /// The configuration this limiter was built with.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}

impl std::fmt::Debug for FixedWindowLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedWindowLimiter")
            .field("config", &self.config)
            .field("window", &self.window())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::clock::ManualClock;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn limiter(limit: u32, interval_ms: u64) -> (FixedWindowLimiter, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000));
        let config = RateLimitConfig::new(limit, Duration::from_millis(interval_ms));
        let limiter = FixedWindowLimiter::with_clock(config, clock.clone()).unwrap();
        (limiter, clock)
    }

    #[test]
    fn test_rejects_zero_limit() {
        let config = RateLimitConfig::new(0, Duration::from_secs(1));
        assert!(FixedWindowLimiter::new(config).is_err());
    }

    #[test]
    fn test_allows_up_to_limit_then_denies() {
        let (limiter, clock) = limiter(5, 1_000);

        for _ in 0..5 {
            assert!(limiter.try_acquire());
            clock.advance(Duration::from_millis(10));
        }
        assert!(!limiter.try_acquire());
        assert_eq!(limiter.remaining(), 0);
    }

    #[test]
    fn test_denial_does_not_change_state() {
        let (limiter, clock) = limiter(2, 1_000);
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        let saturated = limiter.window();

        for _ in 0..10 {
            clock.advance(Duration::from_millis(50));
            assert!(!limiter.try_acquire());
            assert_eq!(limiter.window(), saturated);
        }
    }

    #[test]
    fn test_window_resets_after_interval() {
        let (limiter, clock) = limiter(3, 1_000);
        for _ in 0..3 {
            assert!(limiter.try_acquire());
        }
        assert!(!limiter.try_acquire());

        clock.advance(Duration::from_millis(1_500));
        assert!(limiter.try_acquire());
        assert_eq!(
            limiter.window(),
            Window {
                window_start: 2_500,
                count: 1
            }
        );
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let (limiter, clock) = limiter(1, 1_000);
        // The initial window is anchored at construction time
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());

        clock.advance(Duration::from_millis(999));
        assert!(!limiter.try_acquire());

        clock.advance(Duration::from_millis(1));
        assert!(limiter.try_acquire());
        assert_eq!(limiter.window().window_start, 2_000);
        assert_eq!(limiter.window().count, 1);
    }

    #[test]
    fn test_window_anchors_on_first_request_after_expiry() {
        let (limiter, clock) = limiter(2, 1_000);
        assert!(limiter.try_acquire());

        // Idle well past several intervals; the new window starts at this call
        clock.set(5_321);
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());

        clock.set(6_320);
        assert!(!limiter.try_acquire());
        clock.set(6_321);
        assert!(limiter.try_acquire());
    }

    #[test]
    fn test_time_until_reset() {
        let (limiter, clock) = limiter(1, 1_000);
        assert!(limiter.try_acquire());
        clock.advance(Duration::from_millis(400));
        assert_eq!(limiter.time_until_reset(), Some(Duration::from_millis(600)));

        clock.advance(Duration::from_millis(600));
        assert_eq!(limiter.time_until_reset(), None);
        assert_eq!(limiter.remaining(), 1);
    }

    #[test]
    fn test_very_long_interval_stays_closed() {
        let clock = Arc::new(ManualClock::new(1_000));
        let config = RateLimitConfig::new(1, Duration::from_secs(18_446_744_073_709_552));
        let limiter = FixedWindowLimiter::with_clock(config, clock.clone()).unwrap();

        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());

        clock.advance(Duration::from_millis(450));
        assert!(!limiter.try_acquire());
        clock.advance(Duration::from_secs(365 * 24 * 60 * 60));
        assert!(!limiter.try_acquire());
        assert_eq!(limiter.window().count, 1);
    }

    #[test]
    fn test_clock_behind_window_start_does_not_underflow() {
        let (limiter, clock) = limiter(1, 1_000);
        clock.set(0);
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn test_exactly_limit_granted_across_threads() {
        let (limiter, _clock) = limiter(100, 60_000);
        let limiter = Arc::new(limiter);
        let granted = Arc::new(AtomicUsize::new(0));
        let mut handles = vec![];

        for _ in 0..8 {
            let l = limiter.clone();
            let g = granted.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..250 {
                    if l.try_acquire() {
                        g.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(granted.load(Ordering::SeqCst), 100);
        assert_eq!(limiter.window().count, 100);
    }

    #[test]
    fn test_concurrent_rollover_opens_one_window() {
        let (limiter, clock) = limiter(10, 1_000);
        for _ in 0..10 {
            assert!(limiter.try_acquire());
        }
        clock.advance(Duration::from_millis(1_000));

        let limiter = Arc::new(limiter);
        let granted = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let l = limiter.clone();
                let g = granted.clone();
                thread::spawn(move || {
                    for _ in 0..20 {
                        if l.try_acquire() {
                            g.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(granted.load(Ordering::SeqCst), 10);
        assert_eq!(limiter.window().window_start, 2_000);
    }
}
