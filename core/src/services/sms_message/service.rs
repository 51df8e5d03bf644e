//! SMS message service implementation

use std::sync::Arc;
use std::time::Duration;

use og_shared::utils::mask_phone_number;

use crate::clock::Clock;
use crate::domain::entities::{SmsMessage, SmsStatus};
use crate::errors::{DomainResult, OtpError};
use crate::repositories::SmsRepository;
use crate::services::bounded::{store_call, transport_call};
use crate::services::otp::{ensure_phone, SmsServiceTrait};
use crate::services::throttle::{RequestThrottle, ThrottleDecision};

/// Longest message accepted, one GSM segment
pub const MAX_SMS_LENGTH: usize = 160;

/// Result of sending a free-form SMS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSmsResult {
    pub message_id: uuid::Uuid,
    pub provider_message_id: String,
    pub status: SmsStatus,
}

/// Sends free-form messages and keeps the message log current
pub struct SmsMessageService {
    repository: Arc<dyn SmsRepository>,
    sms_service: Arc<dyn SmsServiceTrait>,
    throttle: Arc<dyn RequestThrottle>,
    clock: Arc<dyn Clock>,
    operation_timeout: Duration,
}

impl SmsMessageService {
    pub fn new(
        repository: Arc<dyn SmsRepository>,
        sms_service: Arc<dyn SmsServiceTrait>,
        throttle: Arc<dyn RequestThrottle>,
        clock: Arc<dyn Clock>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            sms_service,
            throttle,
            clock,
            operation_timeout,
        }
    }

    /// Persist a `pending` record, dispatch, then mark it `sent` or `failed`
    ///
    /// A failed status write after a successful dispatch is only logged:
    /// the message has left and the caller gets the provider id.
    pub async fn send_sms(&self, phone: &str, message: &str) -> DomainResult<SendSmsResult> {
        ensure_phone(phone)?;
        let length = message.chars().count();
        if length == 0 || length > MAX_SMS_LENGTH {
            return Err(OtpError::Validation {
                message: format!("message must be 1 to {} characters", MAX_SMS_LENGTH),
            }
            .into());
        }

        if let ThrottleDecision::Limited { retry_after_seconds } = self.throttle.check(phone).await? {
            return Err(OtpError::RateLimited { retry_after_seconds }.into());
        }

        let masked = mask_phone_number(phone);
        let pending = SmsMessage::pending(
            self.sms_service.sender_number(),
            phone,
            message,
            self.sms_service.provider_name(),
            self.clock.now(),
        );
        let mut record = store_call(self.operation_timeout, "create", self.repository.create(pending)).await?;

        let sent = transport_call(
            self.operation_timeout,
            "send_sms",
            self.sms_service.send_sms(phone, message),
        )
        .await;

        match sent {
            Ok(provider_message_id) => {
                record.mark_sent(provider_message_id.clone(), self.clock.now());
                if let Err(e) = store_call(self.operation_timeout, "update", self.repository.update(record.clone())).await {
                    tracing::warn!(
                        phone = %masked,
                        sms_id = %record.id,
                        error = %e,
                        "Failed to mark SMS as sent"
                    );
                }
                tracing::info!(
                    phone = %masked,
                    sms_id = %record.id,
                    provider = %record.provider,
                    event = "sms_sent",
                    "SMS dispatched"
                );
                Ok(SendSmsResult {
                    message_id: record.id,
                    provider_message_id,
                    status: SmsStatus::Sent,
                })
            }
            Err(e) => {
                record.mark_failed(self.clock.now());
                if let Err(update_err) = store_call(self.operation_timeout, "update", self.repository.update(record.clone())).await {
                    tracing::warn!(
                        phone = %masked,
                        sms_id = %record.id,
                        error = %update_err,
                        "Failed to mark SMS as failed"
                    );
                }
                tracing::error!(
                    phone = %masked,
                    sms_id = %record.id,
                    error = %e,
                    event = "sms_failed",
                    "SMS dispatch failed"
                );
                Err(e)
            }
        }
    }

    /// Most recent messages, newest first
    pub async fn recent(&self, limit: usize) -> DomainResult<Vec<SmsMessage>> {
        store_call(self.operation_timeout, "find_all", self.repository.find_all(limit)).await
    }
}
