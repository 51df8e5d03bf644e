//! Activity log assembly

use std::sync::Arc;

use crate::clock::Clock;
use crate::domain::value_objects::{ActivityLog, RedactedOtp};
use crate::errors::DomainResult;
use crate::services::callback::CallbackService;
use crate::services::otp::OtpService;
use crate::services::sms_message::SmsMessageService;

/// Entries returned per section when no limit is given
pub const DEFAULT_LOG_LIMIT: usize = 50;

/// Hard cap on entries per section
pub const MAX_LOG_LIMIT: usize = 500;

/// Collects recent OTP, callback and SMS records
pub struct LogsService {
    otp: Arc<OtpService>,
    callbacks: Arc<CallbackService>,
    sms: Arc<SmsMessageService>,
    clock: Arc<dyn Clock>,
}

impl LogsService {
    pub fn new(
        otp: Arc<OtpService>,
        callbacks: Arc<CallbackService>,
        sms: Arc<SmsMessageService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            otp,
            callbacks,
            sms,
            clock,
        }
    }

    /// Snapshot of the latest records; OTP codes are redacted
    ///
    /// `limit` applies per section and is clamped to 1..=500.
    pub async fn get_logs(&self, limit: Option<usize>) -> DomainResult<ActivityLog> {
        let limit = limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, MAX_LOG_LIMIT);

        let (otps, callbacks, sms) = tokio::try_join!(
            self.otp.recent(limit),
            self.callbacks.recent(limit),
            self.sms.recent(limit),
        )?;

        let otps = otps.iter().map(RedactedOtp::from).collect();
        Ok(ActivityLog::new(otps, callbacks, sms, self.clock.now()))
    }
}
