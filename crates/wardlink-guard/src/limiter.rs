//! # Fixed-Window Rate Limiter
//!
//! Per-key attempt counter over a fixed window, backing the credential
//! gate's brute-force protection. Window expiry is computed on read; there
//! is no background sweeper.
//!
//! All four operations run under one lock, so two browser tabs submitting
//! PINs simultaneously observe a single consistent counter: increments
//! are monotonic within a window and a reset is atomic with respect to
//! concurrent increments.
//!
//! The `*_at` variants take an explicit `now` so window expiry is testable
//! without sleeping; the public contract methods use `Instant::now()`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Recorded attempts allowed before a key is limited.
    pub max_attempts: u32,
    /// Fixed window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(15 * 60),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Counter {
    attempts: u32,
    window_started: Instant,
}

/// Shared fixed-window attempt limiter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    counters: Arc<Mutex<HashMap<String, Counter>>>,
}

impl RateLimiter {
    /// Create a limiter with the given config.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            counters: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether the key has exhausted its attempts in the current window.
    pub fn is_limited(&self, key: &str) -> bool {
        self.is_limited_at(key, Instant::now())
    }

    /// Clock-explicit variant of [`is_limited`](Self::is_limited).
    pub fn is_limited_at(&self, key: &str, now: Instant) -> bool {
        let counters = self.counters.lock();
        match counters.get(key) {
            Some(counter) if !self.expired(counter, now) => {
                counter.attempts >= self.config.max_attempts
            }
            _ => false,
        }
    }

    /// Record one failed attempt. An expired window restarts at one.
    pub fn record_attempt(&self, key: &str) {
        self.record_attempt_at(key, Instant::now());
    }

    /// Clock-explicit variant of [`record_attempt`](Self::record_attempt).
    pub fn record_attempt_at(&self, key: &str, now: Instant) {
        let mut counters = self.counters.lock();
        let entry = counters.entry(key.to_string()).or_insert(Counter {
            attempts: 0,
            window_started: now,
        });
        if self.expired(entry, now) {
            entry.attempts = 0;
            entry.window_started = now;
        }
        entry.attempts += 1;
    }

    /// Clear the counter before window expiry. Called only on a
    /// verified-correct credential.
    pub fn reset_attempts(&self, key: &str) {
        self.counters.lock().remove(key);
    }

    /// Time until the key's window expires. Zero when the key is not
    /// counted or the window already elapsed.
    pub fn time_remaining(&self, key: &str) -> Duration {
        self.time_remaining_at(key, Instant::now())
    }

    /// Clock-explicit variant of [`time_remaining`](Self::time_remaining).
    pub fn time_remaining_at(&self, key: &str, now: Instant) -> Duration {
        let counters = self.counters.lock();
        match counters.get(key) {
            Some(counter) => (counter.window_started + self.config.window)
                .saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    fn expired(&self, counter: &Counter, now: Instant) -> bool {
        now.saturating_duration_since(counter.window_started) >= self.config.window
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
