//! Tests for the in-memory sliding-window throttle

use chrono::Duration;
use std::sync::Arc;

use crate::clock::ManualClock;
use crate::services::throttle::{RequestThrottle, SlidingWindowThrottle, ThrottleDecision, UnlimitedThrottle};

fn throttle(clock: &ManualClock) -> SlidingWindowThrottle {
    SlidingWindowThrottle::with_clock(5, 60, Arc::new(clock.clone()))
}

#[tokio::test]
async fn test_sixth_request_within_window_is_limited() {
    let clock = ManualClock::default();
    let throttle = throttle(&clock);

    for i in 0..5 {
        let decision = throttle.check("+15551230000").await.unwrap();
        assert_eq!(decision, ThrottleDecision::Admitted { remaining: 4 - i });
        clock.advance(Duration::seconds(2));
    }

    let decision = throttle.check("+15551230000").await.unwrap();
    assert!(matches!(decision, ThrottleDecision::Limited { .. }));
}

#[tokio::test]
async fn test_retry_after_counts_down_to_oldest_expiry() {
    let clock = ManualClock::default();
    let throttle = throttle(&clock);

    for _ in 0..5 {
        throttle.check("+15551230000").await.unwrap();
    }
    clock.advance(Duration::seconds(20));

    let decision = throttle.check("+15551230000").await.unwrap();
    assert_eq!(decision, ThrottleDecision::Limited { retry_after_seconds: 40 });
}

#[tokio::test]
async fn test_window_slides() {
    let clock = ManualClock::default();
    let throttle = throttle(&clock);

    for _ in 0..5 {
        throttle.check("+15551230000").await.unwrap();
    }
    clock.advance(Duration::seconds(60));

    assert!(throttle.check("+15551230000").await.unwrap().is_admitted());
}

#[tokio::test]
async fn test_limited_requests_are_not_recorded() {
    let clock = ManualClock::default();
    let throttle = throttle(&clock);

    for _ in 0..5 {
        throttle.check("+15551230000").await.unwrap();
    }
    clock.advance(Duration::seconds(30));
    for _ in 0..10 {
        assert!(!throttle.check("+15551230000").await.unwrap().is_admitted());
    }

    // only the five admitted hits count, and they are gone after 60s
    clock.advance(Duration::seconds(30));
    assert!(throttle.check("+15551230000").await.unwrap().is_admitted());
}

#[tokio::test]
async fn test_keys_are_independent() {
    let clock = ManualClock::default();
    let throttle = throttle(&clock);

    for _ in 0..5 {
        throttle.check("+15551230000").await.unwrap();
    }

    assert!(throttle.check("+15551230001").await.unwrap().is_admitted());
}

#[tokio::test]
async fn test_reset_clears_history() {
    let clock = ManualClock::default();
    let throttle = throttle(&clock);

    for _ in 0..5 {
        throttle.check("+15551230000").await.unwrap();
    }
    throttle.reset("+15551230000").await.unwrap();

    assert!(throttle.check("+15551230000").await.unwrap().is_admitted());
}

#[tokio::test]
async fn test_unlimited_throttle_admits_everything() {
    let throttle = UnlimitedThrottle;
    for _ in 0..100 {
        assert!(throttle.check("+15551230000").await.unwrap().is_admitted());
    }
}
