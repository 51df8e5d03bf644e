//! Per-call deadlines for store and transport operations

use std::future::Future;
use std::time::Duration;

use crate::errors::{DomainError, DomainResult};

/// Run a store call under `limit`; expiry maps to `StorageUnavailable`
pub(crate) async fn store_call<T, F>(limit: Duration, operation: &'static str, fut: F) -> DomainResult<T>
where
    F: Future<Output = DomainResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(operation, timeout_ms = limit.as_millis() as u64, "Store call timed out");
            Err(DomainError::storage(format!("{} timed out", operation)))
        }
    }
}

/// Run a dispatch call under `limit`; failure or expiry maps to
/// `TransportUnavailable`
pub(crate) async fn transport_call<T, F>(limit: Duration, operation: &'static str, fut: F) -> DomainResult<T>
where
    F: Future<Output = Result<T, String>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(DomainError::transport(e)),
        Err(_) => {
            tracing::error!(operation, timeout_ms = limit.as_millis() as u64, "Dispatch call timed out");
            Err(DomainError::transport(format!("{} timed out", operation)))
        }
    }
}
