//! MySQL implementation of the OtpRepository trait.
//!
//! The `phone` column carries a unique key, so the database itself
//! enforces one outstanding challenge per phone.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use std::sync::Arc;
use uuid::Uuid;

use og_core::clock::{Clock, SystemClock};
use og_core::domain::entities::OtpRecord;
use og_core::errors::DomainError;
use og_core::repositories::OtpRepository;
use og_shared::utils::mask_phone_number;

use super::{column, is_unique_violation, limit_param, parse_uuid, storage_error};

const SELECT_COLUMNS: &str =
    "SELECT id, phone, code, attempts, max_attempts, expires_at, created_at, updated_at FROM otp_records";

/// MySQL implementation of OtpRepository
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: MySqlPool,
    clock: Arc<dyn Clock>,
}

impl MySqlOtpRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: MySqlPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    fn row_to_record(row: &MySqlRow) -> Result<OtpRecord, DomainError> {
        let id: String = column(row, "id")?;

        Ok(OtpRecord {
            id: parse_uuid(&id, "otp")?,
            phone: column(row, "phone")?,
            code: column(row, "code")?,
            attempts: column(row, "attempts")?,
            max_attempts: column(row, "max_attempts")?,
            expires_at: column::<DateTime<Utc>>(row, "expires_at")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let query = r#"
            INSERT INTO otp_records (
                id, phone, code, attempts, max_attempts, expires_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.phone)
            .bind(&record.code)
            .bind(record.attempts)
            .bind(record.max_attempts)
            .bind(record.expires_at)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(record),
            Err(e) if is_unique_violation(&e) => {
                tracing::warn!(
                    phone = %mask_phone_number(&record.phone),
                    "Concurrent OTP insert rejected by unique key"
                );
                Err(DomainError::Conflict {
                    message: "OTP already exists for phone".to_string(),
                })
            }
            Err(e) => Err(storage_error("insert otp", e)),
        }
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError> {
        let query = format!("{} WHERE phone = ?", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find otp", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn update(&self, mut record: OtpRecord) -> Result<OtpRecord, DomainError> {
        record.updated_at = self.clock.now();

        let query = r#"
            UPDATE otp_records
            SET code = ?, attempts = ?, max_attempts = ?, expires_at = ?, updated_at = ?
            WHERE id = ? AND phone = ?
        "#;

        let result = sqlx::query(query)
            .bind(&record.code)
            .bind(record.attempts)
            .bind(record.max_attempts)
            .bind(record.expires_at)
            .bind(record.updated_at)
            .bind(record.id.to_string())
            .bind(&record.phone)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("update otp", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("otp {}", record.id),
            });
        }

        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM otp_records WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete otp", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_phone(&self, phone: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM otp_records WHERE phone = ?")
            .bind(phone)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete otp by phone", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<OtpRecord>, DomainError> {
        let query = format!("{} WHERE expires_at < ?", SELECT_COLUMNS);

        let rows = sqlx::query(&query)
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list expired otps", e))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn increment_attempts(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("begin transaction", e))?;

        let result = sqlx::query("UPDATE otp_records SET attempts = attempts + 1, updated_at = ? WHERE phone = ?")
            .bind(self.clock.now())
            .bind(phone)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("increment attempts", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let query = format!("{} WHERE phone = ?", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(phone)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| storage_error("read incremented otp", e))?;

        tx.commit()
            .await
            .map_err(|e| storage_error("commit transaction", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn find_all(&self, limit: usize) -> Result<Vec<OtpRecord>, DomainError> {
        let query = format!("{} ORDER BY created_at DESC LIMIT ?", SELECT_COLUMNS);

        let rows = sqlx::query(&query)
            .bind(limit_param(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("list otps", e))?;

        rows.iter().map(Self::row_to_record).collect()
    }
}
