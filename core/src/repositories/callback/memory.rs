//! In-memory callback store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{CallbackRequest, CallbackStatus};
use crate::errors::DomainError;

use super::r#trait::CallbackRepository;

#[derive(Default)]
pub struct InMemoryCallbackRepository {
    requests: Arc<RwLock<HashMap<Uuid, CallbackRequest>>>,
}

impl InMemoryCallbackRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CallbackRepository for InMemoryCallbackRepository {
    async fn create(&self, request: CallbackRequest) -> Result<CallbackRequest, DomainError> {
        let mut requests = self.requests.write().await;
        requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CallbackRequest>, DomainError> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: CallbackStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<CallbackRequest>, DomainError> {
        let mut requests = self.requests.write().await;
        Ok(requests.get_mut(&id).map(|request| {
            request.status = status;
            request.updated_at = now;
            request.clone()
        }))
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<CallbackRequest>, DomainError> {
        let requests = self.requests.read().await;
        let mut all: Vec<CallbackRequest> = requests.values().cloned().collect();
        all.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));
        all.truncate(limit);
        Ok(all)
    }
}
