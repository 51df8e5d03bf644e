//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Where the sliding-window state lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitBackend {
    /// Process-local map, reset on restart
    Memory,
    /// Redis sorted sets, shared between instances
    Redis,
}

impl std::str::FromStr for RateLimitBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(RateLimitBackend::Memory),
            "redis" => Ok(RateLimitBackend::Redis),
            _ => Err(format!("Invalid rate limit backend: {}", s)),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Storage for the sliding windows
    pub backend: RateLimitBackend,

    /// Max issuance requests per phone within one window
    pub otp_requests_per_window: u32,

    /// Sliding window length in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            backend: RateLimitBackend::Memory,
            otp_requests_per_window: 5,
            window_seconds: 60,
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_or("RATE_LIMIT_ENABLED", defaults.enabled),
            backend: env_or("RATE_LIMIT_BACKEND", defaults.backend),
            otp_requests_per_window: env_or("RATE_LIMIT_OTP_PER_WINDOW", defaults.otp_requests_per_window),
            window_seconds: env_or("RATE_LIMIT_WINDOW_SECONDS", defaults.window_seconds),
        }
    }
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("redis".parse::<RateLimitBackend>().unwrap(), RateLimitBackend::Redis);
        assert_eq!("Memory".parse::<RateLimitBackend>().unwrap(), RateLimitBackend::Memory);
        assert!("etcd".parse::<RateLimitBackend>().is_err());
    }
}
