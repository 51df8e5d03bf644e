//! OTP repository trait defining the credential store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::OtpRecord;
use crate::errors::DomainError;

/// Persistence contract for OTP records
///
/// Implementations must keep at most one record per phone (unique key) and
/// make every single-record operation atomic. No other serialization is
/// provided: a concurrent issue and verify for the same phone may observe
/// each other's writes.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Insert a new record
    ///
    /// # Returns
    /// * `Ok(OtpRecord)` - The stored record
    /// * `Err(DomainError::Conflict)` - A record already exists for the phone
    /// * `Err(DomainError)` - Storage failure
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Find the record for a phone
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - Record found, expired or not
    /// * `Ok(None)` - No record for the phone
    async fn find_by_phone(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError>;

    /// Replace a record in full, bumping `updated_at`
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No record with this id
    async fn update(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Delete a record by id
    ///
    /// # Returns
    /// * `Ok(true)` - Record deleted
    /// * `Ok(false)` - Nothing to delete
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete the record for a phone, if any
    async fn delete_by_phone(&self, phone: &str) -> Result<bool, DomainError>;

    /// Records whose `expires_at` is strictly before `now`
    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<OtpRecord>, DomainError>;

    /// Atomically add one attempt to the phone's record
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - The record after the increment
    /// * `Ok(None)` - The record vanished concurrently
    async fn increment_attempts(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError>;

    /// Most recently created records first
    async fn find_all(&self, limit: usize) -> Result<Vec<OtpRecord>, DomainError>;
}
