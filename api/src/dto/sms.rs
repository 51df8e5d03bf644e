use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_phone_number;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(custom = "validate_phone_number")]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
    /// Set when the outstanding code was kept instead of sending a new one
    pub already_sent: bool,
    pub expires_at: DateTime<Utc>,
    /// Only present when code echo is enabled outside production
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(custom = "validate_phone_number")]
    pub phone_number: String,
    #[validate(length(equal = 6, message = "Invalid OTP format. Must be 6 digits."))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub valid: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendSmsRequest {
    #[validate(custom = "validate_phone_number")]
    pub phone_number: String,
    #[validate(length(min = 1, max = 160, message = "Message must be between 1 and 160 characters"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendSmsResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_message_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}
