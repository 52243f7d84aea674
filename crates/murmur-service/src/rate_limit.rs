//! Submission rate limiter.
//!
//! A fixed window per origin key: the first acquire in a window admits and
//! starts the clock, the next `max_requests - 1` admit, everything after
//! that is denied until the window resets. State is process-local and
//! best-effort only - horizontally scaled instances do not coordinate, so
//! the effective limit is per instance. That is an accepted property of the
//! deployment, not something this type tries to hide.

use dashmap::DashMap;
use murmur_common::RateLimitConfig;
use std::time::{Duration, Instant};

/// Outcome of an acquire attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Denied,
}

impl RateLimitDecision {
    /// True when the request may proceed
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window rate limiter keyed by origin.
///
/// Injected into the service context rather than living as process-global
/// state, so it can be constructed per test and swept on a schedule.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: DashMap<String, Window>,
}

impl RateLimiter {
    /// Create a limiter admitting `max_requests` per `window` per key
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: DashMap::new(),
        }
    }

    /// Create a limiter from application configuration
    #[must_use]
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, Duration::from_secs(config.window_secs))
    }

    /// Try to admit one request for `origin_key`.
    ///
    /// A missing or expired window resets to a fresh one counting this
    /// request; a full window denies without consuming anything.
    pub fn try_acquire(&self, origin_key: &str) -> RateLimitDecision {
        let now = Instant::now();
        let mut entry = self
            .windows
            .entry(origin_key.to_string())
            .or_insert(Window {
                count: 0,
                reset_at: now + self.window,
            });

        if now > entry.reset_at {
            *entry = Window {
                count: 1,
                reset_at: now + self.window,
            };
            return RateLimitDecision::Allowed;
        }

        if entry.count >= self.max_requests {
            return RateLimitDecision::Denied;
        }

        entry.count += 1;
        RateLimitDecision::Allowed
    }

    /// Drop windows whose reset time has passed.
    ///
    /// Keeps the table bounded by origins seen within the current window;
    /// meant to run on a background interval.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.windows.retain(|_, window| now <= window.reset_at);
    }

    /// Number of origins currently tracked
    #[must_use]
    pub fn tracked_origins(&self) -> usize {
        self.windows.len()
    }
}
