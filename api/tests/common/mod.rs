//! Shared helpers for the API integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use og_api::AppState;
use og_core::services::{Gateway, GatewayConfig, GatewayDependencies, GatewayService, SmsServiceTrait};

pub const PHONE: &str = "+14155550100";

/// SMS transport that keeps every message it was asked to send
#[derive(Default)]
pub struct RecordingSms {
    sent: Mutex<Vec<(String, String)>>,
    fail: AtomicBool,
}

impl RecordingSms {
    pub fn failing() -> Self {
        let sms = Self::default();
        sms.fail.store(true, Ordering::SeqCst);
        sms
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Code carried by the last OTP message sent to `phone`
    pub fn last_code(&self, phone: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == phone)
            .and_then(|(_, text)| text.strip_prefix("Your OTP is: ").map(|rest| rest[..6].to_string()))
    }

    fn record(&self, phone: &str, text: String) -> Result<String, String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("provider down".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((phone.to_string(), text));
        Ok(format!("rec_{}", sent.len()))
    }
}

#[async_trait]
impl SmsServiceTrait for RecordingSms {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, String> {
        self.record(phone, og_core::services::render_otp_message(code))
    }

    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        self.record(phone, message.to_string())
    }

    fn provider_name(&self) -> &str {
        "recording"
    }

    fn sender_number(&self) -> &str {
        "+10000000000"
    }
}

/// In-memory gateway around `sms`
pub fn gateway(sms: Arc<RecordingSms>, limit: Option<(u32, u64)>, expose_code: bool) -> Arc<Gateway> {
    let mut config = GatewayConfig::default();
    config.otp.expose_code = expose_code;
    Arc::new(Gateway::new(GatewayDependencies::in_memory(sms, limit), config))
}

pub fn state(gateway: Arc<Gateway>) -> AppState {
    let service: Arc<dyn GatewayService> = gateway;
    AppState::new(service)
}
