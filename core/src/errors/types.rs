//! Error taxonomy for the OTP lifecycle
//!
//! Wrong codes are not errors: the verifier reports them as a negative
//! outcome. These variants cover input that never reached the state
//! machine and infrastructure that could not serve the request.

use thiserror::Error;

/// OTP issuance and verification failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid input: {message}")]
    Validation { message: String },

    #[error("OTP not found or expired")]
    NotFoundOrExpired,

    #[error("Maximum verification attempts reached")]
    MaxAttemptsReached,

    #[error("Too many requests, retry in {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    #[error("SMS transport unavailable: {message}")]
    TransportUnavailable { message: String },

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },
}
