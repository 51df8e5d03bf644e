//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection used by the shared rate limiter
//! - `database` - Storage backend selection and MySQL pool settings
//! - `environment` - Environment detection and logging configuration
//! - `otp` - OTP lifecycle timings and limits
//! - `rate_limit` - Per-phone issuance throttling
//! - `server` - HTTP server and CORS configuration
//! - `sms` - SMS provider credentials

pub mod cache;
pub mod database;
pub mod environment;
pub mod otp;
pub mod rate_limit;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::{DatabaseConfig, StorageBackend};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use rate_limit::{RateLimitBackend, RateLimitConfig};
pub use server::{CorsConfig, ServerConfig};
pub use sms::{SmsConfig, SmsProvider};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// OTP lifecycle configuration
    pub otp: OtpConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// SMS provider configuration
    pub sms: SmsConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            otp: OtpConfig::default(),
            rate_limit: RateLimitConfig::default(),
            sms: SmsConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Values not present in the environment fall back to the defaults of
    /// each section. Production never echoes OTP codes, whatever the
    /// `OTP_EXPOSE_CODE` variable says.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        let mut otp = OtpConfig::from_env();
        otp.expose_code_in_response &= environment.allows_code_echo();

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            otp,
            rate_limit: RateLimitConfig::from_env(),
            sms: SmsConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Read and parse an environment variable, falling back to `default`
/// when the variable is missing or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_otp_policy() {
        let config = AppConfig::default();
        assert_eq!(config.otp.code_expiration_seconds, 300);
        assert_eq!(config.otp.resend_cooldown_seconds, 120);
        assert_eq!(config.otp.max_attempts, 3);
        assert_eq!(config.rate_limit.otp_requests_per_window, 5);
        assert_eq!(config.rate_limit.window_seconds, 60);
        assert!(!config.otp.expose_code_in_response);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        std::env::set_var("OG_SHARED_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("OG_SHARED_TEST_GARBAGE", 42u32), 42);
        std::env::remove_var("OG_SHARED_TEST_GARBAGE");
    }
}
