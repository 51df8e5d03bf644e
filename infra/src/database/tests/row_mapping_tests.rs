//! Unit tests for the MySQL column helpers

use og_core::domain::entities::{CallbackPriority, CallbackStatus, SmsStatus};
use og_core::errors::{DomainError, OtpError};
use uuid::Uuid;

use crate::database::mysql::{is_unique_violation, limit_param, parse_enum, parse_uuid, storage_error};
use crate::database::PoolStatistics;

#[test]
fn test_parse_uuid_round_trips_char36() {
    let id = Uuid::new_v4();
    assert_eq!(parse_uuid(&id.to_string(), "otp").unwrap(), id);
}

#[test]
fn test_parse_uuid_rejects_garbage() {
    match parse_uuid("not-a-uuid", "callback") {
        Err(DomainError::Internal { message }) => assert!(message.contains("callback")),
        other => panic!("expected internal error, got {:?}", other),
    }
}

#[test]
fn test_parse_enum_columns() {
    assert_eq!(parse_enum::<CallbackStatus>("in_progress").unwrap(), CallbackStatus::InProgress);
    assert_eq!(parse_enum::<CallbackPriority>("high").unwrap(), CallbackPriority::High);
    assert_eq!(parse_enum::<SmsStatus>("failed").unwrap(), SmsStatus::Failed);
    assert!(parse_enum::<CallbackStatus>("archived").is_err());
}

#[test]
fn test_limit_param() {
    assert_eq!(limit_param(50), 50);
    assert_eq!(limit_param(usize::MAX), i64::MAX);
}

#[test]
fn test_storage_error_is_transient() {
    let err = storage_error("find otp", sqlx::Error::PoolTimedOut);
    assert!(matches!(err, DomainError::Otp(OtpError::StorageUnavailable { .. })));
    assert!(err.is_transient());
}

#[test]
fn test_non_database_error_is_not_unique_violation() {
    assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
}

#[test]
fn test_pool_statistics_in_use() {
    let stats = PoolStatistics {
        size: 5,
        idle: 2,
        max_connections: 10,
    };
    assert_eq!(stats.in_use(), 3);
}
