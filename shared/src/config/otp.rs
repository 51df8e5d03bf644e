//! OTP lifecycle configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// OTP issuance and verification settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds a freshly issued code stays valid
    pub code_expiration_seconds: i64,

    /// A resend is refused while more than this many seconds of the
    /// current code's lifetime remain
    pub resend_cooldown_seconds: i64,

    /// Verification attempts allowed per code
    pub max_attempts: u32,

    /// Period of the expired-record sweep in seconds
    pub cleanup_interval_seconds: u64,

    /// Upper bound for a single store or SMS call in milliseconds
    pub operation_timeout_ms: u64,

    /// Return the generated code to the caller (development only)
    #[serde(default)]
    pub expose_code_in_response: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_expiration_seconds: 300,
            resend_cooldown_seconds: 120,
            max_attempts: 3,
            cleanup_interval_seconds: 60,
            operation_timeout_ms: 5000,
            expose_code_in_response: false,
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_expiration_seconds: env_or("OTP_EXPIRATION_SECONDS", defaults.code_expiration_seconds),
            resend_cooldown_seconds: env_or("OTP_RESEND_COOLDOWN_SECONDS", defaults.resend_cooldown_seconds),
            max_attempts: env_or("OTP_MAX_ATTEMPTS", defaults.max_attempts),
            cleanup_interval_seconds: env_or("OTP_CLEANUP_INTERVAL_SECONDS", defaults.cleanup_interval_seconds),
            operation_timeout_ms: env_or("OTP_OPERATION_TIMEOUT_MS", defaults.operation_timeout_ms),
            expose_code_in_response: env_or("OTP_EXPOSE_CODE", defaults.expose_code_in_response),
        }
    }
}
