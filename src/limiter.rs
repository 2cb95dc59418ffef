// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter for contact-form submissions.
//!
//! One counter per client id, reset wholesale when the window elapses —
//! not a sliding window. State is in-process only: every instance of the
//! service counts independently, and entries live for the lifetime of the
//! process unless swept by [`FixedWindowLimiter::cleanup`].

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitDecision {
    /// Request is allowed
    Allowed {
        /// Remaining requests in the current window
        remaining: u32,
    },
    /// Request is rate limited
    Limited {
        /// Time until the window resets
        retry_after: Duration,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Per-client window state.
#[derive(Debug)]
struct WindowEntry {
    /// Submissions seen in the current window
    count: u32,
    /// Start of the current window
    window_start: Instant,
}

/// Thread-safe fixed-window rate limiter.
pub struct FixedWindowLimiter {
    config: RateLimitConfig,
    entries: Arc<RwLock<HashMap<String, WindowEntry>>>,
}

impl FixedWindowLimiter {
    /// Create a new limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Check whether a request from `client_id` is allowed, updating the
    /// client's window state.
    pub async fn check(&self, client_id: &str) -> RateLimitDecision {
        let now = Instant::now();
        let window = self.config.window_duration();
        let mut entries = self.entries.write().await;

        let entry = entries.entry(client_id.to_string()).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        // A fully elapsed window resets the counter outright.
        if now.duration_since(entry.window_start) > window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.config.max_requests {
            let retry_after = (entry.window_start + window).saturating_duration_since(now);
            info!(client = %client_id, ?retry_after, "Rate limit exceeded");
            return RateLimitDecision::Limited { retry_after };
        }

        entry.count += 1;
        let remaining = self.config.max_requests - entry.count;
        debug!(client = %client_id, remaining, "Request allowed");
        RateLimitDecision::Allowed { remaining }
    }

    /// Drop entries whose window has fully elapsed. Behavior-neutral:
    /// such entries would be reset on their next touch anyway.
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let window = self.config.window_duration();

        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| now.duration_since(entry.window_start) <= window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    fn limiter(max_requests: u32, window_secs: u64) -> FixedWindowLimiter {
        FixedWindowLimiter::new(RateLimitConfig {
            max_requests,
            window_secs,
        })
    }

    #[tokio::test]
    async fn allows_up_to_max_then_denies() {
        let limiter = limiter(5, 3600);

        for i in 0..5 {
            assert!(
                limiter.check("203.0.113.7").await.is_allowed(),
                "request {} should be allowed",
                i + 1
            );
        }

        match limiter.check("203.0.113.7").await {
            RateLimitDecision::Limited { retry_after } => {
                assert!(retry_after <= Duration::from_secs(3600));
            }
            RateLimitDecision::Allowed { .. } => panic!("6th request should be limited"),
        }
    }

    #[tokio::test]
    async fn denied_requests_do_not_consume_quota() {
        let limiter = limiter(1, 3600);

        assert!(limiter.check("client").await.is_allowed());
        for _ in 0..3 {
            assert!(!limiter.check("client").await.is_allowed());
        }
    }

    #[tokio::test]
    async fn clients_are_counted_independently() {
        let limiter = limiter(1, 3600);

        assert!(limiter.check("a").await.is_allowed());
        assert!(!limiter.check("a").await.is_allowed());
        assert!(limiter.check("b").await.is_allowed());
    }

    #[tokio::test(start_paused = true)]
    async fn window_elapse_resets_counter() {
        let limiter = limiter(2, 60);

        assert!(limiter.check("client").await.is_allowed());
        assert!(limiter.check("client").await.is_allowed());
        assert!(!limiter.check("client").await.is_allowed());

        time::advance(Duration::from_secs(61)).await;

        // Fresh window: allowed again, with the counter reset to 1.
        match limiter.check("client").await {
            RateLimitDecision::Allowed { remaining } => assert_eq!(remaining, 1),
            RateLimitDecision::Limited { .. } => panic!("window should have reset"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cleanup_drops_only_elapsed_windows() {
        let limiter = limiter(5, 60);

        limiter.check("old").await;
        time::advance(Duration::from_secs(30)).await;
        limiter.check("fresh").await;
        time::advance(Duration::from_secs(40)).await;

        limiter.cleanup().await;

        let entries = limiter.entries.read().await;
        assert!(!entries.contains_key("old"));
        assert!(entries.contains_key("fresh"));
    }
}
