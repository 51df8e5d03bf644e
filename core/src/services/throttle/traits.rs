//! Throttle trait shared by the in-memory and Redis limiters

use async_trait::async_trait;

use crate::errors::DomainError;

/// Outcome of a throttle check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Request recorded; `remaining` more fit in the current window
    Admitted { remaining: u32 },
    /// Over the limit; nothing recorded
    Limited { retry_after_seconds: u64 },
}

impl ThrottleDecision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, ThrottleDecision::Admitted { .. })
    }
}

/// Sliding-window limiter keyed by an identity such as a phone number
#[async_trait]
pub trait RequestThrottle: Send + Sync {
    /// Check and, when admitted, record one request for `key`
    async fn check(&self, key: &str) -> Result<ThrottleDecision, DomainError>;

    /// Forget all history for `key`
    async fn reset(&self, key: &str) -> Result<(), DomainError>;
}
