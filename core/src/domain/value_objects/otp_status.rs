//! Public status of the OTP outstanding for a phone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::OtpRecord;

/// Status view that never exposes the code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpStatus {
    pub phone_number: String,
    pub has_active_otp: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub attempts: u32,
    pub max_attempts: u32,
}

impl OtpStatus {
    /// Build the view; an expired record reports as inactive
    pub fn from_record(phone: &str, record: Option<&OtpRecord>, now: DateTime<Utc>, default_max_attempts: u32) -> Self {
        match record {
            Some(r) if !r.is_expired_at(now) => Self {
                phone_number: phone.to_string(),
                has_active_otp: true,
                expires_at: Some(r.expires_at),
                attempts: r.attempts,
                max_attempts: r.max_attempts,
            },
            _ => Self {
                phone_number: phone.to_string(),
                has_active_otp: false,
                expires_at: None,
                attempts: 0,
                max_attempts: default_max_attempts,
            },
        }
    }
}
