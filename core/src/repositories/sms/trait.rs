//! SMS message log repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::SmsMessage;
use crate::errors::DomainError;

/// Persistence contract for outbound SMS records
#[async_trait]
pub trait SmsRepository: Send + Sync {
    async fn create(&self, message: SmsMessage) -> Result<SmsMessage, DomainError>;

    /// Replace a message in full
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No message with this id
    async fn update(&self, message: SmsMessage) -> Result<SmsMessage, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SmsMessage>, DomainError>;

    /// Most recently created first
    async fn find_all(&self, limit: usize) -> Result<Vec<SmsMessage>, DomainError>;
}
