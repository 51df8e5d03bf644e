//! Redis sliding-window throttle
//!
//! Each key maps to a sorted set of admission timestamps in milliseconds.
//! Pruning, counting and recording run in one Lua script so concurrent
//! gateway instances see a consistent window.

use async_trait::async_trait;
use redis::Script;
use std::sync::Arc;
use uuid::Uuid;

use og_core::clock::{Clock, SystemClock};
use og_core::errors::DomainError;
use og_core::services::throttle::{RequestThrottle, ThrottleDecision};
use og_shared::config::RateLimitConfig;
use og_shared::utils::mask_phone_number;

use crate::cache::RedisClient;

const SLIDING_WINDOW_SCRIPT: &str = r#"
local key = KEYS[1]
local now = tonumber(ARGV[1])
local window = tonumber(ARGV[2])
local limit = tonumber(ARGV[3])
redis.call('ZREMRANGEBYSCORE', key, '-inf', now - window)
local count = redis.call('ZCARD', key)
if count >= limit then
    local oldest = redis.call('ZRANGE', key, 0, 0, 'WITHSCORES')
    return {0, tonumber(oldest[2]) + window - now}
end
redis.call('ZADD', key, now, ARGV[4])
redis.call('PEXPIRE', key, window)
return {1, limit - count - 1}
"#;

/// Redis implementation of [`RequestThrottle`]
pub struct RedisSlidingWindowThrottle {
    redis_client: Arc<RedisClient>,
    script: Script,
    limit: u32,
    window_ms: i64,
    clock: Arc<dyn Clock>,
}

impl RedisSlidingWindowThrottle {
    pub fn new(redis_client: Arc<RedisClient>, config: &RateLimitConfig) -> Self {
        Self::with_clock(redis_client, config, Arc::new(SystemClock))
    }

    pub fn with_clock(redis_client: Arc<RedisClient>, config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            redis_client,
            script: Script::new(SLIDING_WINDOW_SCRIPT),
            limit: config.otp_requests_per_window,
            window_ms: i64::try_from(config.window_seconds.saturating_mul(1000)).unwrap_or(i64::MAX),
            clock,
        }
    }

    fn window_key(&self, key: &str) -> String {
        self.redis_client.make_key(&window_suffix(key))
    }
}

#[async_trait]
impl RequestThrottle for RedisSlidingWindowThrottle {
    async fn check(&self, key: &str) -> Result<ThrottleDecision, DomainError> {
        let now_ms = self.clock.now().timestamp_millis();
        let member = format!("{}-{}", now_ms, Uuid::new_v4());
        let mut conn = self.redis_client.get_connection();

        let reply: Vec<i64> = self
            .script
            .key(self.window_key(key))
            .arg(now_ms)
            .arg(self.window_ms)
            .arg(self.limit)
            .arg(member)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Redis throttle check failed");
                DomainError::storage(format!("Rate limiter unavailable: {}", e))
            })?;

        let decision = decision_from_reply(&reply)?;
        if let ThrottleDecision::Limited { retry_after_seconds } = decision {
            tracing::warn!(
                phone = %mask_phone_number(key),
                retry_after_seconds,
                event = "rate_limit_exceeded",
                "Request throttled"
            );
        }

        Ok(decision)
    }

    async fn reset(&self, key: &str) -> Result<(), DomainError> {
        self.redis_client
            .delete(&self.window_key(key))
            .await
            .map(|_| ())
            .map_err(DomainError::from)
    }
}

pub(crate) fn window_suffix(key: &str) -> String {
    format!("rate:otp:{}", key)
}

/// Interpret the `{admitted, value}` pair returned by the script
pub(crate) fn decision_from_reply(reply: &[i64]) -> Result<ThrottleDecision, DomainError> {
    match reply {
        [1, remaining] => Ok(ThrottleDecision::Admitted {
            remaining: u32::try_from(*remaining).unwrap_or(0),
        }),
        [0, retry_ms] => Ok(ThrottleDecision::Limited {
            retry_after_seconds: retry_after_seconds(*retry_ms),
        }),
        _ => Err(DomainError::Internal {
            message: format!("Unexpected throttle reply: {:?}", reply),
        }),
    }
}

/// Whole seconds, rounded up, never below one
pub(crate) fn retry_after_seconds(retry_ms: i64) -> u64 {
    let ms = u64::try_from(retry_ms).unwrap_or(0);
    ms.div_ceil(1000).max(1)
}
