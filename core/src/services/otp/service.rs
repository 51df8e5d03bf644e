//! OTP issuer and verifier

use std::sync::Arc;
use subtle::ConstantTimeEq;

use og_shared::utils::{is_valid_phone, mask_phone_number};

use crate::clock::Clock;
use crate::domain::entities::{OtpRecord, CODE_LENGTH};
use crate::domain::value_objects::OtpStatus;
use crate::errors::{DomainError, DomainResult, OtpError};
use crate::repositories::OtpRepository;
use crate::services::bounded::{store_call, transport_call};
use crate::services::throttle::{RequestThrottle, ThrottleDecision};

use super::config::OtpServiceConfig;
use super::traits::SmsServiceTrait;
use super::types::{SendOtpOutcome, SendOtpResult, VerifyOtpResult, VerifyRejection};

/// OTP service handling issuance, verification and status lookups
pub struct OtpService {
    /// Credential store
    repository: Arc<dyn OtpRepository>,
    /// SMS transport for dispatching codes
    sms_service: Arc<dyn SmsServiceTrait>,
    /// Per-phone issuance limiter
    throttle: Arc<dyn RequestThrottle>,
    clock: Arc<dyn Clock>,
    config: OtpServiceConfig,
}

impl OtpService {
    pub fn new(
        repository: Arc<dyn OtpRepository>,
        sms_service: Arc<dyn SmsServiceTrait>,
        throttle: Arc<dyn RequestThrottle>,
        clock: Arc<dyn Clock>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            repository,
            sms_service,
            throttle,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a code to a phone number
    ///
    /// This method:
    /// 1. Records the request against the per-phone throttle
    /// 2. Returns `AlreadySent` while the current code is inside its cooldown
    /// 3. Replaces any previous record with a fresh code
    /// 4. Dispatches the code, rolling the record back if dispatch fails
    ///
    /// # Returns
    ///
    /// * `Ok(SendOtpResult)` - Code sent, or the outstanding one kept
    /// * `Err(DomainError)` - Validation, throttle, storage or transport failure
    pub async fn send_otp(&self, phone: &str) -> DomainResult<SendOtpResult> {
        ensure_phone(phone)?;
        let masked = mask_phone_number(phone);

        if let ThrottleDecision::Limited { retry_after_seconds } = self.throttle.check(phone).await? {
            return Err(OtpError::RateLimited { retry_after_seconds }.into());
        }

        let now = self.clock.now();
        let existing = self.store("find_by_phone", self.repository.find_by_phone(phone)).await?;

        if let Some(current) = existing {
            if current.blocks_resend(now, self.config.resend_cooldown) {
                tracing::info!(
                    phone = %masked,
                    expires_at = %current.expires_at,
                    event = "otp_already_sent",
                    "Active OTP still inside resend cooldown"
                );
                return Ok(SendOtpResult {
                    outcome: SendOtpOutcome::AlreadySent,
                    phone: phone.to_string(),
                    expires_at: current.expires_at,
                    message_id: None,
                    code: None,
                });
            }

            // The previous code stops being valid here even if not yet expired
            self.store("delete_by_phone", self.repository.delete_by_phone(phone))
                .await?;
        }

        let record = OtpRecord::issue(phone, now, self.config.code_expiration, self.config.max_attempts);
        let record = match self.store("create", self.repository.create(record)).await {
            Ok(record) => record,
            Err(DomainError::Conflict { .. }) => return self.concurrent_issue(phone, &masked).await,
            Err(e) => return Err(e),
        };

        tracing::info!(
            phone = %masked,
            event = "otp_generated",
            otp_id = %record.id,
            expires_at = %record.expires_at,
            "Generated new OTP"
        );

        let sent = transport_call(
            self.config.operation_timeout,
            "send_otp",
            self.sms_service.send_otp(phone, &record.code),
        )
        .await;

        let message_id = match sent {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(
                    phone = %masked,
                    error = %e,
                    event = "otp_dispatch_failed",
                    "Failed to dispatch OTP, rolling back"
                );
                if let Err(rollback) = self.store("delete", self.repository.delete(record.id)).await {
                    tracing::error!(
                        phone = %masked,
                        error = %rollback,
                        otp_id = %record.id,
                        "Failed to roll back undelivered OTP"
                    );
                }
                return Err(e);
            }
        };

        tracing::info!(
            phone = %masked,
            event = "otp_sent",
            provider = self.sms_service.provider_name(),
            message_id = %message_id,
            "OTP dispatched"
        );

        Ok(SendOtpResult {
            outcome: SendOtpOutcome::Sent,
            phone: phone.to_string(),
            expires_at: record.expires_at,
            message_id: Some(message_id),
            code: self.config.expose_code.then(|| record.code.clone()),
        })
    }

    /// Verify a submitted code
    ///
    /// Checks run in a fixed order: lookup, expiry, attempt ceiling, then the
    /// attempt is counted before the code is compared. A matching code
    /// consumes the record. A wrong code is reported through
    /// `VerifyOtpResult::Rejected`, never as an error.
    pub async fn verify_otp(&self, phone: &str, code: &str) -> DomainResult<VerifyOtpResult> {
        ensure_phone(phone)?;
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpError::Validation {
                message: format!("OTP must be {} digits", CODE_LENGTH),
            }
            .into());
        }
        let masked = mask_phone_number(phone);

        let Some(record) = self.store("find_by_phone", self.repository.find_by_phone(phone)).await? else {
            tracing::info!(phone = %masked, event = "otp_not_found", "No OTP outstanding");
            return Ok(VerifyOtpResult::Rejected(VerifyRejection::NotFound));
        };

        let now = self.clock.now();
        if record.is_expired_at(now) {
            self.store("delete_by_phone", self.repository.delete_by_phone(phone))
                .await?;
            tracing::info!(phone = %masked, event = "otp_expired", "Expired OTP removed on verify");
            return Ok(VerifyOtpResult::Rejected(VerifyRejection::Expired));
        }

        if record.is_exhausted() {
            tracing::warn!(
                phone = %masked,
                attempts = record.attempts,
                event = "otp_max_attempts",
                "Verification refused, attempt ceiling reached"
            );
            return Ok(VerifyOtpResult::Rejected(VerifyRejection::MaxAttemptsReached));
        }

        let counted = self
            .store("increment_attempts", self.repository.increment_attempts(phone))
            .await?;

        // A concurrent resend may have replaced the record since the lookup
        let Some(counted) = counted.filter(|r| r.id == record.id) else {
            tracing::info!(phone = %masked, event = "otp_replaced", "OTP replaced during verification");
            return Ok(VerifyOtpResult::Rejected(VerifyRejection::NotFound));
        };

        // Concurrent verifies may have pushed the count past the ceiling after the lookup
        if counted.attempts > counted.max_attempts {
            tracing::warn!(
                phone = %masked,
                attempts = counted.attempts,
                event = "otp_max_attempts",
                "Verification refused, attempt ceiling passed concurrently"
            );
            return Ok(VerifyOtpResult::Rejected(VerifyRejection::MaxAttemptsReached));
        }

        if constant_time_compare(&counted.code, code) {
            // Only the caller that removes the record gets the verification
            let consumed = self.store("delete", self.repository.delete(counted.id)).await?;
            if !consumed {
                tracing::info!(phone = %masked, event = "otp_consumed", "OTP consumed by a concurrent verification");
                return Ok(VerifyOtpResult::Rejected(VerifyRejection::NotFound));
            }
            tracing::info!(
                phone = %masked,
                attempts = counted.attempts,
                event = "otp_verified",
                "OTP verified"
            );
            return Ok(VerifyOtpResult::Verified);
        }

        tracing::warn!(
            phone = %masked,
            attempts = counted.attempts,
            max_attempts = counted.max_attempts,
            event = "otp_invalid",
            "Invalid OTP submitted"
        );

        if counted.is_exhausted() {
            Ok(VerifyOtpResult::Rejected(VerifyRejection::MaxAttemptsReached))
        } else {
            Ok(VerifyOtpResult::Rejected(VerifyRejection::InvalidCode {
                remaining_attempts: counted.remaining_attempts(),
            }))
        }
    }

    /// Read-only view of the phone's OTP; never includes the code
    pub async fn otp_status(&self, phone: &str) -> DomainResult<OtpStatus> {
        ensure_phone(phone)?;
        let record = self.store("find_by_phone", self.repository.find_by_phone(phone)).await?;
        Ok(OtpStatus::from_record(
            phone,
            record.as_ref(),
            self.clock.now(),
            self.config.max_attempts,
        ))
    }

    /// Most recent records, newest first
    pub async fn recent(&self, limit: usize) -> DomainResult<Vec<OtpRecord>> {
        self.store("find_all", self.repository.find_all(limit)).await
    }

    /// Another issuance for the phone created its record first; report it
    /// as the outstanding code instead of sending a second one
    async fn concurrent_issue(&self, phone: &str, masked: &str) -> DomainResult<SendOtpResult> {
        let winner = self.store("find_by_phone", self.repository.find_by_phone(phone)).await?;
        let Some(winner) = winner else {
            // The winner was rolled back or consumed in between
            return Err(DomainError::storage("OTP record changed during issuance"));
        };

        tracing::info!(
            phone = %masked,
            expires_at = %winner.expires_at,
            event = "otp_already_sent",
            "Concurrent issuance already created an OTP"
        );

        Ok(SendOtpResult {
            outcome: SendOtpOutcome::AlreadySent,
            phone: phone.to_string(),
            expires_at: winner.expires_at,
            message_id: None,
            code: None,
        })
    }

    async fn store<T>(
        &self,
        operation: &'static str,
        fut: impl std::future::Future<Output = DomainResult<T>>,
    ) -> DomainResult<T> {
        store_call(self.config.operation_timeout, operation, fut).await
    }
}

/// Reject anything that is not E.164-like
pub(crate) fn ensure_phone(phone: &str) -> DomainResult<()> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(DomainError::Otp(OtpError::Validation {
            message: "phone number must be in E.164 format".to_string(),
        }))
    }
}

fn constant_time_compare(code_a: &str, code_b: &str) -> bool {
    code_a.as_bytes().ct_eq(code_b.as_bytes()).into()
}
