//! Integration tests for the Redis throttle
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p og_infra --test redis_integration -- --ignored

use std::sync::Arc;

use og_core::services::throttle::{RequestThrottle, ThrottleDecision};
use og_infra::cache::{CacheConfig, RedisClient};
use og_infra::throttle::RedisSlidingWindowThrottle;
use og_shared::config::RateLimitConfig;

async fn client() -> Arc<RedisClient> {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let config = CacheConfig::new(url).with_prefix("otp_gateway_test");
    Arc::new(RedisClient::new(config).await.expect("Redis reachable"))
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    assert!(client().await.health_check().await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_sliding_window_limits_and_resets() {
    let config = RateLimitConfig {
        otp_requests_per_window: 2,
        window_seconds: 60,
        ..Default::default()
    };
    let throttle = RedisSlidingWindowThrottle::new(client().await, &config);
    let key = format!("+1555{}", std::process::id());
    throttle.reset(&key).await.unwrap();

    assert_eq!(throttle.check(&key).await.unwrap(), ThrottleDecision::Admitted { remaining: 1 });
    assert_eq!(throttle.check(&key).await.unwrap(), ThrottleDecision::Admitted { remaining: 0 });
    assert!(!throttle.check(&key).await.unwrap().is_admitted());

    throttle.reset(&key).await.unwrap();
    assert!(throttle.check(&key).await.unwrap().is_admitted());
    throttle.reset(&key).await.unwrap();
}
