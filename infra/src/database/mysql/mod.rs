//! MySQL implementations of the core repository traits

mod callback_repository_impl;
mod otp_repository_impl;
mod sms_repository_impl;

pub use callback_repository_impl::MySqlCallbackRepository;
pub use otp_repository_impl::MySqlOtpRepository;
pub use sms_repository_impl::MySqlSmsRepository;

use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Row};
use std::str::FromStr;
use uuid::Uuid;

use og_core::errors::DomainError;

/// Read a column, mapping decode failures to `DomainError::Internal`
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}

/// Parse a `CHAR(36)` id column
pub(crate) fn parse_uuid(value: &str, name: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid {} UUID: {}", name, e),
    })
}

/// Parse a string-encoded enum column
pub(crate) fn parse_enum<T>(value: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(|message| DomainError::Internal { message })
}

/// Clamp a result limit into a SQL `LIMIT` parameter
pub(crate) fn limit_param(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Connection-level failures surface as storage unavailability
pub(crate) fn storage_error(operation: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(operation, error = %err, "MySQL operation failed");
    DomainError::storage(format!("Failed to {}: {}", operation, err))
}

/// Whether the error is a duplicate-key violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
