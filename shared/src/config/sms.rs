//! SMS provider configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Supported SMS providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Logs messages instead of sending them
    Mock,
    /// Plivo REST API
    Plivo,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(SmsProvider::Mock),
            "plivo" => Ok(SmsProvider::Plivo),
            _ => Err(format!("Invalid SMS provider: {}", s)),
        }
    }
}

impl std::fmt::Display for SmsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmsProvider::Mock => write!(f, "mock"),
            SmsProvider::Plivo => write!(f, "plivo"),
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Provider to dispatch through
    pub provider: SmsProvider,

    /// Provider account identifier
    #[serde(default)]
    pub auth_id: String,

    /// Provider secret
    #[serde(default, skip_serializing)]
    pub auth_token: String,

    /// Sender phone number in E.164 format
    pub from_number: String,

    /// HTTP timeout for provider calls in seconds
    pub request_timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::Mock,
            auth_id: String::new(),
            auth_token: String::new(),
            from_number: String::from("+10000000000"),
            request_timeout_secs: 10,
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    ///
    /// Plivo is only selected when all three credentials are present.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let auth_id = std::env::var("PLIVO_AUTH_ID").unwrap_or_default();
        let auth_token = std::env::var("PLIVO_AUTH_TOKEN").unwrap_or_default();
        let from_number = std::env::var("PLIVO_FROM_NUMBER").unwrap_or_default();

        let requested: SmsProvider = env_or("SMS_PROVIDER", SmsProvider::Plivo);
        let has_credentials = !auth_id.is_empty() && !auth_token.is_empty() && !from_number.is_empty();
        let provider = match requested {
            SmsProvider::Plivo if has_credentials => SmsProvider::Plivo,
            _ => SmsProvider::Mock,
        };

        Self {
            provider,
            auth_id,
            auth_token,
            from_number: if from_number.is_empty() { defaults.from_number } else { from_number },
            request_timeout_secs: env_or("SMS_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
        }
    }
}
