//! # Infrastructure Layer
//!
//! Concrete implementations behind the core traits of the OTP gateway:
//! - **Database**: MySQL repositories using SQLx
//! - **Cache**: Redis client backing the shared request throttle
//! - **SMS**: Plivo transport and a logging mock for development
//! - **Wiring**: assembles a [`og_core::Gateway`] from [`og_shared::AppConfig`]

use og_core::errors::DomainError;

pub mod cache;
pub mod database;
pub mod sms;
pub mod throttle;
pub mod wiring;

pub use wiring::build_gateway;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS provider error
    #[error("SMS service error: {0}")]
    Sms(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Http(_) | InfrastructureError::Sms(_) => DomainError::transport(err.to_string()),
            InfrastructureError::Config(message) => DomainError::Internal { message },
            other => DomainError::storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use og_core::errors::OtpError;

    #[test]
    fn test_sms_error_maps_to_transport() {
        let err: DomainError = InfrastructureError::Sms("provider down".into()).into();
        assert!(matches!(err, DomainError::Otp(OtpError::TransportUnavailable { .. })));
    }

    #[test]
    fn test_database_error_maps_to_storage() {
        let err: DomainError = InfrastructureError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, DomainError::Otp(OtpError::StorageUnavailable { .. })));
    }

    #[test]
    fn test_config_error_is_internal() {
        let err: DomainError = InfrastructureError::Config("bad url".into()).into();
        assert!(matches!(err, DomainError::Internal { .. }));
    }
}
