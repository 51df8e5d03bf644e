//! Unit tests for domain errors

use crate::errors::{DomainError, OtpError};

#[test]
fn test_otp_error_converts_into_domain_error() {
    let err: DomainError = OtpError::MaxAttemptsReached.into();
    assert_eq!(err, DomainError::Otp(OtpError::MaxAttemptsReached));
    assert_eq!(err.to_string(), "Maximum verification attempts reached");
}

#[test]
fn test_rate_limited_message_carries_retry_hint() {
    let err = OtpError::RateLimited {
        retry_after_seconds: 42,
    };
    assert_eq!(err.to_string(), "Too many requests, retry in 42 seconds");
}

#[test]
fn test_transient_classification() {
    assert!(DomainError::storage("db down").is_transient());
    assert!(DomainError::transport("provider timeout").is_transient());
    assert!(!DomainError::Validation {
        message: "bad phone".to_string()
    }
    .is_transient());
    assert!(!DomainError::Otp(OtpError::NotFoundOrExpired).is_transient());
}
