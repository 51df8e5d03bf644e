//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, retry hints)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const OTP_NOT_FOUND_OR_EXPIRED: &str = "OTP_NOT_FOUND_OR_EXPIRED";
    pub const OTP_MAX_ATTEMPTS: &str = "OTP_MAX_ATTEMPTS";
    pub const SMS_UNAVAILABLE: &str = "SMS_UNAVAILABLE";
    pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
    pub const CONFLICT: &str = "CONFLICT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_detail_creates_map() {
        let response = ErrorResponse::new(error_codes::RATE_LIMIT_EXCEEDED, "slow down")
            .add_detail("retry_after_seconds", 42);

        let details = response.details.expect("details set");
        assert_eq!(details["retry_after_seconds"], serde_json::json!(42));
    }

    #[test]
    fn test_details_omitted_when_empty() {
        let response = ErrorResponse::new(error_codes::NOT_FOUND, "missing");
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["error"], "NOT_FOUND");
    }
}
