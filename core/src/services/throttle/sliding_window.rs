//! In-memory sliding-window throttle

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::errors::DomainError;

use super::traits::{RequestThrottle, ThrottleDecision};

// Windows are swept for idle keys once the map grows past this
const IDLE_SWEEP_THRESHOLD: usize = 10_000;

/// Process-local sliding-window limiter
///
/// Keeps the admitted request timestamps per key under a single mutex.
/// State resets on restart.
pub struct SlidingWindowThrottle {
    limit: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
    hits: Mutex<HashMap<String, VecDeque<DateTime<Utc>>>>,
}

impl SlidingWindowThrottle {
    /// Create a throttle admitting `limit` requests per `window_seconds`
    pub fn new(limit: u32, window_seconds: u64) -> Self {
        Self::with_clock(limit, window_seconds, Arc::new(SystemClock))
    }

    pub fn with_clock(limit: u32, window_seconds: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            limit,
            window: Duration::seconds(window_seconds as i64),
            clock,
            hits: Mutex::new(HashMap::new()),
        }
    }

    fn prune(window: &mut VecDeque<DateTime<Utc>>, cutoff: DateTime<Utc>) {
        while window.front().is_some_and(|t| *t <= cutoff) {
            window.pop_front();
        }
    }
}

#[async_trait]
impl RequestThrottle for SlidingWindowThrottle {
    async fn check(&self, key: &str) -> Result<ThrottleDecision, DomainError> {
        let now = self.clock.now();
        let cutoff = now - self.window;
        let mut hits = self.hits.lock().await;

        if hits.len() > IDLE_SWEEP_THRESHOLD {
            hits.retain(|_, w| w.back().is_some_and(|t| *t > cutoff));
        }

        let window = hits.entry(key.to_string()).or_default();
        Self::prune(window, cutoff);

        if window.len() as u32 >= self.limit {
            let retry_after = window
                .front()
                .map(|oldest| (*oldest + self.window - now).num_seconds().max(1) as u64)
                .unwrap_or(1);

            tracing::warn!(
                key = %og_shared::utils::mask_phone_number(key),
                retry_after_seconds = retry_after,
                event = "rate_limit_exceeded",
                "Request throttled"
            );
            return Ok(ThrottleDecision::Limited {
                retry_after_seconds: retry_after,
            });
        }

        window.push_back(now);
        Ok(ThrottleDecision::Admitted {
            remaining: self.limit - window.len() as u32,
        })
    }

    async fn reset(&self, key: &str) -> Result<(), DomainError> {
        self.hits.lock().await.remove(key);
        Ok(())
    }
}

/// Throttle that admits everything, used when rate limiting is disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct UnlimitedThrottle;

#[async_trait]
impl RequestThrottle for UnlimitedThrottle {
    async fn check(&self, _key: &str) -> Result<ThrottleDecision, DomainError> {
        Ok(ThrottleDecision::Admitted { remaining: u32::MAX })
    }

    async fn reset(&self, _key: &str) -> Result<(), DomainError> {
        Ok(())
    }
}
