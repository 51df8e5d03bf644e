use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use og_core::domain::entities::{CallbackPriority, CallbackStatus};

use super::validate_phone_number;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CallbackRequestDto {
    #[validate(custom = "validate_phone_number")]
    pub phone_number: String,
    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
    pub priority: Option<CallbackPriority>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackResponse {
    pub success: bool,
    pub message: String,
    pub request_id: String,
    pub status: CallbackStatus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCallbackStatusRequest {
    pub status: CallbackStatus,
}
