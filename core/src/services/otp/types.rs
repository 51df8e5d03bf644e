//! Types for OTP service results

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::OtpError;

/// Whether a new code went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SendOtpOutcome {
    /// A fresh code was generated and dispatched
    Sent,
    /// The current code is still inside its resend cooldown
    AlreadySent,
}

/// Result of an issuance request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOtpResult {
    pub outcome: SendOtpOutcome,
    pub phone: String,
    /// Expiry of the code now outstanding (the original one for `AlreadySent`)
    pub expires_at: DateTime<Utc>,
    /// Provider message id when a code was dispatched
    pub message_id: Option<String>,
    /// Only populated when code echo is enabled
    pub code: Option<String>,
}

/// Why a verification was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyRejection {
    /// No record for the phone
    NotFound,
    /// The record had passed its expiry and was removed
    Expired,
    /// Attempt ceiling reached; the code is no longer compared
    MaxAttemptsReached,
    /// Wrong code, attempts left
    InvalidCode { remaining_attempts: u32 },
}

impl VerifyRejection {
    /// Error class of this rejection, `None` for an ordinary wrong code
    pub fn as_error(&self) -> Option<OtpError> {
        match self {
            VerifyRejection::NotFound | VerifyRejection::Expired => Some(OtpError::NotFoundOrExpired),
            VerifyRejection::MaxAttemptsReached => Some(OtpError::MaxAttemptsReached),
            VerifyRejection::InvalidCode { .. } => None,
        }
    }

    pub fn is_not_found_or_expired(&self) -> bool {
        matches!(self, VerifyRejection::NotFound | VerifyRejection::Expired)
    }

    pub fn message(&self) -> String {
        match self {
            VerifyRejection::NotFound => "OTP not found or expired. Please request a new OTP.".to_string(),
            VerifyRejection::Expired => "OTP expired. Please request a new OTP.".to_string(),
            VerifyRejection::MaxAttemptsReached => {
                "Maximum verification attempts reached. Please request a new OTP.".to_string()
            }
            VerifyRejection::InvalidCode { remaining_attempts } => {
                format!("Invalid OTP. {} attempt(s) remaining.", remaining_attempts)
            }
        }
    }
}

/// Result of a verification request
///
/// A wrong code is a normal negative result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOtpResult {
    Verified,
    Rejected(VerifyRejection),
}

impl VerifyOtpResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerifyOtpResult::Verified)
    }

    pub fn rejection(&self) -> Option<VerifyRejection> {
        match self {
            VerifyOtpResult::Verified => None,
            VerifyOtpResult::Rejected(r) => Some(*r),
        }
    }

    pub fn message(&self) -> String {
        match self {
            VerifyOtpResult::Verified => "OTP verified successfully".to_string(),
            VerifyOtpResult::Rejected(r) => r.message(),
        }
    }
}
