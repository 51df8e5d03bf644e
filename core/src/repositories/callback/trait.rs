//! Callback request repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{CallbackRequest, CallbackStatus};
use crate::errors::DomainError;

/// Persistence contract for callback requests
#[async_trait]
pub trait CallbackRepository: Send + Sync {
    async fn create(&self, request: CallbackRequest) -> Result<CallbackRequest, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CallbackRequest>, DomainError>;

    /// Set the status and `updated_at`
    ///
    /// # Returns
    /// * `Ok(None)` - No request with this id
    async fn update_status(
        &self,
        id: Uuid,
        status: CallbackStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<CallbackRequest>, DomainError>;

    /// Most recently requested first
    async fn find_all(&self, limit: usize) -> Result<Vec<CallbackRequest>, DomainError>;
}
