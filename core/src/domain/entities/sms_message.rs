//! Outbound SMS message log entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery state as far as this service knows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsStatus {
    Pending,
    Sent,
    Delivered,
    Failed,
}

impl SmsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmsStatus::Pending => "pending",
            SmsStatus::Sent => "sent",
            SmsStatus::Delivered => "delivered",
            SmsStatus::Failed => "failed",
        }
    }
}

impl std::str::FromStr for SmsStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SmsStatus::Pending),
            "sent" => Ok(SmsStatus::Sent),
            "delivered" => Ok(SmsStatus::Delivered),
            "failed" => Ok(SmsStatus::Failed),
            _ => Err(format!("Invalid SMS status: {}", s)),
        }
    }
}

/// Free-form SMS sent through the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMessage {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub message: String,
    pub status: SmsStatus,
    pub provider: String,
    pub provider_message_id: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SmsMessage {
    /// New `pending` message
    pub fn pending(
        from: impl Into<String>,
        to: impl Into<String>,
        message: impl Into<String>,
        provider: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from: from.into(),
            to: to.into(),
            message: message.into(),
            status: SmsStatus::Pending,
            provider: provider.into(),
            provider_message_id: None,
            sent_at: None,
            delivered_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn mark_sent(&mut self, provider_message_id: impl Into<String>, now: DateTime<Utc>) {
        self.status = SmsStatus::Sent;
        self.provider_message_id = Some(provider_message_id.into());
        self.sent_at = Some(now);
        self.updated_at = now;
    }

    pub fn mark_failed(&mut self, now: DateTime<Utc>) {
        self.status = SmsStatus::Failed;
        self.updated_at = now;
    }
}
