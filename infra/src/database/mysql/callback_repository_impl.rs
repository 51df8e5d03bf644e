//! MySQL implementation of the CallbackRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use og_core::domain::entities::{CallbackRequest, CallbackStatus};
use og_core::errors::DomainError;
use og_core::repositories::CallbackRepository;

use super::{column, limit_param, parse_enum, parse_uuid, storage_error};

const SELECT_COLUMNS: &str = "SELECT id, phone_number, message, priority, status, requested_at, created_at, updated_at FROM callback_requests";

/// MySQL implementation of CallbackRepository
pub struct MySqlCallbackRepository {
    pool: MySqlPool,
}

impl MySqlCallbackRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &MySqlRow) -> Result<CallbackRequest, DomainError> {
        let id: String = column(row, "id")?;
        let priority: String = column(row, "priority")?;
        let status: String = column(row, "status")?;

        Ok(CallbackRequest {
            id: parse_uuid(&id, "callback")?,
            phone_number: column(row, "phone_number")?,
            message: column(row, "message")?,
            priority: parse_enum(&priority)?,
            status: parse_enum(&status)?,
            requested_at: column::<DateTime<Utc>>(row, "requested_at")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<CallbackRequest>, DomainError> {
        let query = format!("{} WHERE id = ?", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find callback", e))?;

        row.as_ref().map(Self::row_to_request).transpose()
    }
}

#[async_trait]
impl CallbackRepository for MySqlCallbackRepository {
    async fn create(&self, request: CallbackRequest) -> Result<CallbackRequest, DomainError> {
        let query = r#"
            INSERT INTO callback_requests (
                id, phone_number, message, priority, status, requested_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(request.id.to_string())
            .bind(&request.phone_number)
            .bind(&request.message)
            .bind(request.priority.as_str())
            .bind(request.status.as_str())
            .bind(request.requested_at)
            .bind(request.created_at)
            .bind(request.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("insert callback", e))?;

        Ok(request)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CallbackRequest>, DomainError> {
        self.fetch(id).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: CallbackStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<CallbackRequest>, DomainError> {
        let result = sqlx::query("UPDATE callback_requests SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(now)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("update callback status", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.fetch(id).await
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<CallbackRequest>, DomainError> {
        let query = format!("{} ORDER BY requested_at DESC LIMIT ?", SELECT_COLUMNS);

        let rows = sqlx::query(&query)
            .bind(limit_param(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list callbacks", e))?;

        rows.iter().map(Self::row_to_request).collect()
    }
}
