//! Domain-specific error types and error handling.

mod types;

pub use types::OtpError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to the OTP lifecycle taxonomy
    #[error(transparent)]
    Otp(#[from] OtpError),
}

impl DomainError {
    /// Storage failure, surfaced as `OtpError::StorageUnavailable`
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Otp(OtpError::StorageUnavailable {
            message: message.into(),
        })
    }

    /// Dispatch failure, surfaced as `OtpError::TransportUnavailable`
    pub fn transport(message: impl Into<String>) -> Self {
        DomainError::Otp(OtpError::TransportUnavailable {
            message: message.into(),
        })
    }

    /// Whether retrying later might succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::Otp(
                OtpError::StorageUnavailable { .. }
                    | OtpError::TransportUnavailable { .. }
                    | OtpError::RateLimited { .. }
            )
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests;
