//! In-memory rate limiting for chat requests.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<String, VecDeque<Instant>>`.
//! Two limits are enforced before any upstream call is made:
//! - Per-session: 10 chat requests/min
//! - Global: 20 chat requests/min
//!
//! Session ids come from clients and are not authenticated, so the global
//! window is what actually protects the provider quota.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::env::env_parse;

const DEFAULT_PER_SESSION_LIMIT: usize = 10;
const DEFAULT_PER_SESSION_WINDOW_SECS: u64 = 60;

const DEFAULT_GLOBAL_LIMIT: usize = 20;
const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_session_limit: usize,
    pub per_session_window: Duration,
    pub global_limit: usize,
    pub global_window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_session_limit: DEFAULT_PER_SESSION_LIMIT,
            per_session_window: Duration::from_secs(DEFAULT_PER_SESSION_WINDOW_SECS),
            global_limit: DEFAULT_GLOBAL_LIMIT,
            global_window: Duration::from_secs(DEFAULT_GLOBAL_WINDOW_SECS),
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            per_session_limit: env_parse("RATE_LIMIT_PER_SESSION", DEFAULT_PER_SESSION_LIMIT),
            per_session_window: Duration::from_secs(env_parse(
                "RATE_LIMIT_PER_SESSION_WINDOW_SECS",
                DEFAULT_PER_SESSION_WINDOW_SECS,
            )),
            global_limit: env_parse("RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            global_window: Duration::from_secs(env_parse("RATE_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS)),
        }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum RateLimitError {
    #[error("per-session rate limit exceeded (max {limit} requests/{window_secs}s)")]
    PerSessionExceeded { limit: usize, window_secs: u64 },
    #[error("global rate limit exceeded (max {limit} requests/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<RateLimiterInner>>,
    config: RateLimitConfig,
}

#[derive(Default)]
struct RateLimiterInner {
    session_requests: HashMap<String, VecDeque<Instant>>,
    global_requests: VecDeque<Instant>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self { inner: Arc::new(Mutex::new(RateLimiterInner::default())), config }
    }

    /// Check both per-session and global limits, then record the request.
    ///
    /// # Errors
    ///
    /// Returns which window is full; nothing is recorded in that case.
    pub fn check_and_record(&self, session_id: &str) -> Result<(), RateLimitError> {
        self.check_and_record_at(session_id, Instant::now())
    }

    fn check_and_record_at(&self, session_id: &str, now: Instant) -> Result<(), RateLimitError> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let inner = &mut *guard;
        let cfg = self.config;

        prune_window(&mut inner.global_requests, now, cfg.global_window);
        if inner.global_requests.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded {
                limit: cfg.global_limit,
                window_secs: cfg.global_window.as_secs(),
            });
        }

        let session = inner
            .session_requests
            .entry(session_id.to_string())
            .or_default();
        prune_window(session, now, cfg.per_session_window);
        if session.len() >= cfg.per_session_limit {
            return Err(RateLimitError::PerSessionExceeded {
                limit: cfg.per_session_limit,
                window_secs: cfg.per_session_window.as_secs(),
            });
        }

        session.push_back(now);
        inner.global_requests.push_back(now);

        // Idle sessions would otherwise accumulate forever.
        let window = cfg.per_session_window;
        inner
            .session_requests
            .retain(|_, q| q.back().is_some_and(|&last| now.duration_since(last) <= window));

        Ok(())
    }
}

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
