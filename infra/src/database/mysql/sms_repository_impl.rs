//! MySQL implementation of the SmsRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use og_core::domain::entities::SmsMessage;
use og_core::errors::DomainError;
use og_core::repositories::SmsRepository;

use super::{column, limit_param, parse_enum, parse_uuid, storage_error};

const SELECT_COLUMNS: &str = "SELECT id, from_number, to_number, message, status, provider, provider_message_id, sent_at, delivered_at, created_at, updated_at FROM sms_messages";

/// MySQL implementation of SmsRepository
pub struct MySqlSmsRepository {
    pool: MySqlPool,
}

impl MySqlSmsRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_message(row: &MySqlRow) -> Result<SmsMessage, DomainError> {
        let id: String = column(row, "id")?;
        let status: String = column(row, "status")?;

        Ok(SmsMessage {
            id: parse_uuid(&id, "sms")?,
            from: column(row, "from_number")?,
            to: column(row, "to_number")?,
            message: column(row, "message")?,
            status: parse_enum(&status)?,
            provider: column(row, "provider")?,
            provider_message_id: column(row, "provider_message_id")?,
            sent_at: column::<Option<DateTime<Utc>>>(row, "sent_at")?,
            delivered_at: column::<Option<DateTime<Utc>>>(row, "delivered_at")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl SmsRepository for MySqlSmsRepository {
    async fn create(&self, message: SmsMessage) -> Result<SmsMessage, DomainError> {
        let query = r#"
            INSERT INTO sms_messages (
                id, from_number, to_number, message, status, provider,
                provider_message_id, sent_at, delivered_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(message.id.to_string())
            .bind(&message.from)
            .bind(&message.to)
            .bind(&message.message)
            .bind(message.status.as_str())
            .bind(&message.provider)
            .bind(&message.provider_message_id)
            .bind(message.sent_at)
            .bind(message.delivered_at)
            .bind(message.created_at)
            .bind(message.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("insert sms", e))?;

        Ok(message)
    }

    async fn update(&self, message: SmsMessage) -> Result<SmsMessage, DomainError> {
        let query = r#"
            UPDATE sms_messages
            SET status = ?, provider_message_id = ?, sent_at = ?, delivered_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(message.status.as_str())
            .bind(&message.provider_message_id)
            .bind(message.sent_at)
            .bind(message.delivered_at)
            .bind(message.updated_at)
            .bind(message.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("update sms", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("sms {}", message.id),
            });
        }

        Ok(message)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SmsMessage>, DomainError> {
        let query = format!("{} WHERE id = ?", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find sms", e))?;

        row.as_ref().map(Self::row_to_message).transpose()
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<SmsMessage>, DomainError> {
        let query = format!("{} ORDER BY created_at DESC LIMIT ?", SELECT_COLUMNS);

        let rows = sqlx::query(&query)
            .bind(limit_param(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list sms", e))?;

        rows.iter().map(Self::row_to_message).collect()
    }
}
