//! Mock SMS Service Implementation
//!
//! Logs messages instead of sending them. Selected when no provider
//! credentials are configured.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use og_core::services::otp::{render_otp_message, SmsServiceTrait};
use og_shared::utils::mask_phone_number;

/// Mock SMS service for development and testing
#[derive(Clone)]
pub struct MockSmsService {
    /// Sender number reported to callers
    from_number: String,
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
}

impl MockSmsService {
    pub fn new(from_number: impl Into<String>) -> Self {
        Self {
            from_number: from_number.into(),
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    fn deliver(&self, to: &str, message_len: usize) -> Result<String, String> {
        let masked = mask_phone_number(to);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(provider = "mock", phone = %masked, "Mock SMS service simulating failure");
            return Err("Simulated SMS sending failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked,
            message_id = %message_id,
            message_length = message_len,
            count,
            "Mock SMS accepted"
        );

        Ok(message_id)
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new("+10000000000")
    }
}

#[async_trait]
impl SmsServiceTrait for MockSmsService {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, String> {
        self.deliver(phone, render_otp_message(code).len())
    }

    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        self.deliver(phone, message.len())
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn sender_number(&self) -> &str {
        &self.from_number
    }
}
