//! Recent gateway activity for operators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{CallbackRequest, OtpRecord, SmsMessage};

/// OTP record with the code removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactedOtp {
    pub id: Uuid,
    pub phone: String,
    pub attempts: u32,
    pub max_attempts: u32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&OtpRecord> for RedactedOtp {
    fn from(record: &OtpRecord) -> Self {
        Self {
            id: record.id,
            phone: record.phone.clone(),
            attempts: record.attempts,
            max_attempts: record.max_attempts,
            expires_at: record.expires_at,
            created_at: record.created_at,
        }
    }
}

/// A counted list of entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSection<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for LogSection<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Snapshot returned by the logs endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub otps: LogSection<RedactedOtp>,
    pub callbacks: LogSection<CallbackRequest>,
    pub sms: LogSection<SmsMessage>,
    pub total_records: usize,
    pub timestamp: DateTime<Utc>,
}

impl ActivityLog {
    pub fn new(
        otps: Vec<RedactedOtp>,
        callbacks: Vec<CallbackRequest>,
        sms: Vec<SmsMessage>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let total_records = otps.len() + callbacks.len() + sms.len();
        Self {
            otps: otps.into(),
            callbacks: callbacks.into(),
            sms: sms.into(),
            total_records,
            timestamp,
        }
    }
}
