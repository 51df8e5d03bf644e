//! Callback service implementation

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use og_shared::utils::mask_phone_number;

use crate::clock::Clock;
use crate::domain::entities::{CallbackPriority, CallbackRequest, CallbackStatus};
use crate::errors::{DomainError, DomainResult, OtpError};
use crate::repositories::CallbackRepository;
use crate::services::bounded::store_call;
use crate::services::otp::ensure_phone;

/// Message stored when the requester leaves none
pub const DEFAULT_CALLBACK_MESSAGE: &str = "Callback requested";

/// Records callback requests and their operator-driven status
pub struct CallbackService {
    repository: Arc<dyn CallbackRepository>,
    clock: Arc<dyn Clock>,
    operation_timeout: Duration,
}

impl CallbackService {
    pub fn new(repository: Arc<dyn CallbackRepository>, clock: Arc<dyn Clock>, operation_timeout: Duration) -> Self {
        Self {
            repository,
            clock,
            operation_timeout,
        }
    }

    /// Create a request in status `requested`
    pub async fn request_callback(
        &self,
        phone: &str,
        message: Option<&str>,
        priority: Option<CallbackPriority>,
    ) -> DomainResult<CallbackRequest> {
        ensure_phone(phone)?;

        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_CALLBACK_MESSAGE);
        let request = CallbackRequest::new(phone, message, priority.unwrap_or_default(), self.clock.now());

        let request = store_call(self.operation_timeout, "create", self.repository.create(request)).await?;

        tracing::info!(
            phone = %mask_phone_number(phone),
            callback_id = %request.id,
            priority = request.priority.as_str(),
            event = "callback_requested",
            "Callback requested"
        );

        Ok(request)
    }

    /// Look a request up by id
    pub async fn get_callback_status(&self, request_id: &str) -> DomainResult<CallbackRequest> {
        let id = parse_id(request_id)?;
        store_call(self.operation_timeout, "find_by_id", self.repository.find_by_id(id))
            .await?
            .ok_or_else(|| not_found(request_id))
    }

    /// Move a request to `in_progress`, `completed` or `cancelled`
    pub async fn update_callback_status(
        &self,
        request_id: &str,
        status: CallbackStatus,
    ) -> DomainResult<CallbackRequest> {
        if !status.is_assignable() {
            return Err(OtpError::Validation {
                message: format!("status '{}' cannot be set explicitly", status),
            }
            .into());
        }
        let id = parse_id(request_id)?;

        let updated = store_call(
            self.operation_timeout,
            "update_status",
            self.repository.update_status(id, status, self.clock.now()),
        )
        .await?
        .ok_or_else(|| not_found(request_id))?;

        tracing::info!(
            callback_id = %updated.id,
            status = updated.status.as_str(),
            event = "callback_status_updated",
            "Callback status updated"
        );

        Ok(updated)
    }

    /// Most recent requests, newest first
    pub async fn recent(&self, limit: usize) -> DomainResult<Vec<CallbackRequest>> {
        store_call(self.operation_timeout, "find_all", self.repository.find_all(limit)).await
    }
}

fn parse_id(request_id: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(request_id).map_err(|_| {
        OtpError::Validation {
            message: "request id must be a UUID".to_string(),
        }
        .into()
    })
}

fn not_found(request_id: &str) -> DomainError {
    DomainError::NotFound {
        resource: format!("callback request {}", request_id),
    }
}
