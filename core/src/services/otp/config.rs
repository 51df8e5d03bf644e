//! Configuration for the OTP service

use chrono::Duration;

use og_shared::config::OtpConfig;

use crate::domain::entities::{DEFAULT_EXPIRATION_SECONDS, MAX_ATTEMPTS};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Lifetime of an issued code
    pub code_expiration: Duration,
    /// A resend is refused while more than this much lifetime remains
    pub resend_cooldown: Duration,
    /// Verification attempts allowed per code
    pub max_attempts: u32,
    /// Deadline for each store or dispatch call
    pub operation_timeout: std::time::Duration,
    /// Include the code in `SendOtpResult` (development only)
    pub expose_code: bool,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration: Duration::seconds(DEFAULT_EXPIRATION_SECONDS),
            resend_cooldown: Duration::seconds(120),
            max_attempts: MAX_ATTEMPTS,
            operation_timeout: std::time::Duration::from_millis(5000),
            expose_code: false,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_expiration: Duration::seconds(config.code_expiration_seconds),
            resend_cooldown: Duration::seconds(config.resend_cooldown_seconds),
            max_attempts: config.max_attempts,
            operation_timeout: std::time::Duration::from_millis(config.operation_timeout_ms),
            expose_code: config.expose_code_in_response,
        }
    }
}
