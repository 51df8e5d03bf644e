//! In-memory OTP store keyed by phone

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::OtpRecord;
use crate::errors::DomainError;

use super::r#trait::OtpRepository;

/// Process-local OTP store
///
/// Every operation takes the map lock once, so single-record operations are
/// atomic. Contents are lost on restart.
pub struct InMemoryOtpRepository {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryOtpRepository {
    /// Create an empty store using the system clock for `updated_at`
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for InMemoryOtpRepository {
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.phone) {
            return Err(DomainError::Conflict {
                message: "OTP already exists for phone".to_string(),
            });
        }

        records.insert(record.phone.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(phone).cloned())
    }

    async fn update(&self, mut record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let mut records = self.records.write().await;

        match records.get(&record.phone) {
            Some(existing) if existing.id == record.id => {
                record.updated_at = self.clock.now();
                records.insert(record.phone.clone(), record.clone());
                Ok(record)
            }
            _ => Err(DomainError::NotFound {
                resource: format!("otp {}", record.id),
            }),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        let phone = records
            .values()
            .find(|r| r.id == id)
            .map(|r| r.phone.clone());

        Ok(match phone {
            Some(phone) => records.remove(&phone).is_some(),
            None => false,
        })
    }

    async fn delete_by_phone(&self, phone: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.remove(phone).is_some())
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<OtpRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.expires_at < now)
            .cloned()
            .collect())
    }

    async fn increment_attempts(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError> {
        let mut records = self.records.write().await;
        let now = self.clock.now();

        Ok(records.get_mut(phone).map(|record| {
            record.attempts += 1;
            record.updated_at = now;
            record.clone()
        }))
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<OtpRecord>, DomainError> {
        let records = self.records.read().await;
        let mut all: Vec<OtpRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit);
        Ok(all)
    }
}
