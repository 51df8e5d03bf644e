//! Human callback requests raised from the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a callback request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackStatus {
    Requested,
    InProgress,
    Completed,
    Cancelled,
}

impl CallbackStatus {
    /// Statuses an operator may set explicitly
    pub fn is_assignable(&self) -> bool {
        !matches!(self, CallbackStatus::Requested)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackStatus::Requested => "requested",
            CallbackStatus::InProgress => "in_progress",
            CallbackStatus::Completed => "completed",
            CallbackStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for CallbackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CallbackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(CallbackStatus::Requested),
            "in_progress" => Ok(CallbackStatus::InProgress),
            "completed" => Ok(CallbackStatus::Completed),
            "cancelled" => Ok(CallbackStatus::Cancelled),
            _ => Err(format!("Invalid callback status: {}", s)),
        }
    }
}

/// Urgency attached by the requester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CallbackPriority {
    Low,
    #[default]
    Normal,
    High,
}

impl CallbackPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallbackPriority::Low => "low",
            CallbackPriority::Normal => "normal",
            CallbackPriority::High => "high",
        }
    }
}

impl std::str::FromStr for CallbackPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(CallbackPriority::Low),
            "normal" => Ok(CallbackPriority::Normal),
            "high" => Ok(CallbackPriority::High),
            _ => Err(format!("Invalid callback priority: {}", s)),
        }
    }
}

/// Request for a human to call the phone number back
///
/// Never expires automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackRequest {
    pub id: Uuid,
    pub phone_number: String,
    pub message: String,
    pub priority: CallbackPriority,
    pub status: CallbackStatus,
    pub requested_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CallbackRequest {
    pub fn new(
        phone_number: impl Into<String>,
        message: impl Into<String>,
        priority: CallbackPriority,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone_number: phone_number.into(),
            message: message.into(),
            priority,
            status: CallbackStatus::Requested,
            requested_at: now,
            created_at: now,
            updated_at: now,
        }
    }
}
