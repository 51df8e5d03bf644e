//! In-memory SMS message log

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::SmsMessage;
use crate::errors::DomainError;

use super::r#trait::SmsRepository;

#[derive(Default)]
pub struct InMemorySmsRepository {
    messages: Arc<RwLock<HashMap<Uuid, SmsMessage>>>,
}

impl InMemorySmsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SmsRepository for InMemorySmsRepository {
    async fn create(&self, message: SmsMessage) -> Result<SmsMessage, DomainError> {
        self.messages.write().await.insert(message.id, message.clone());
        Ok(message)
    }

    async fn update(&self, message: SmsMessage) -> Result<SmsMessage, DomainError> {
        let mut messages = self.messages.write().await;
        match messages.get_mut(&message.id) {
            Some(slot) => {
                *slot = message.clone();
                Ok(message)
            }
            None => Err(DomainError::NotFound {
                resource: format!("sms {}", message.id),
            }),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SmsMessage>, DomainError> {
        Ok(self.messages.read().await.get(&id).cloned())
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<SmsMessage>, DomainError> {
        let messages = self.messages.read().await;
        let mut all: Vec<SmsMessage> = messages.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit);
        Ok(all)
    }
}
