//! Plivo SMS Service Implementation
//!
//! Sends messages through the Plivo REST API:
//! `POST {base_url}/Account/{auth_id}/Message/` with basic auth and a JSON
//! body of `src`, `dst` and `text`. The provider id returned to callers is
//! the first entry of `message_uuid`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use og_core::services::otp::{render_otp_message, SmsServiceTrait};
use og_shared::config::SmsConfig;
use og_shared::utils::{is_valid_phone, mask_phone_number};

use crate::InfrastructureError;

/// Default Plivo API root
pub const PLIVO_API_BASE_URL: &str = "https://api.plivo.com/v1";

/// Plivo SMS service configuration
#[derive(Debug, Clone)]
pub struct PlivoConfig {
    /// Plivo Auth ID
    pub auth_id: String,
    /// Plivo Auth Token
    pub auth_token: String,
    /// Sender number owned by the account
    pub from_number: String,
    /// API root, overridable for testing
    pub base_url: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl PlivoConfig {
    /// Build from the shared SMS configuration
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.auth_id.is_empty() || config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "PLIVO_AUTH_ID and PLIVO_AUTH_TOKEN must be set".to_string(),
            ));
        }

        if !is_valid_phone(&config.from_number) {
            return Err(InfrastructureError::Config(
                "PLIVO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            auth_id: config.auth_id.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            base_url: PLIVO_API_BASE_URL.to_string(),
            request_timeout_secs: config.request_timeout_secs,
        })
    }

    /// Message endpoint for this account
    pub fn message_url(&self) -> String {
        format!(
            "{}/Account/{}/Message/",
            self.base_url.trim_end_matches('/'),
            self.auth_id
        )
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PlivoMessageRequest<'a> {
    pub src: &'a str,
    pub dst: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlivoMessageResponse {
    #[serde(default)]
    pub message_uuid: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlivoErrorResponse {
    pub error: String,
}

/// Plivo SMS service implementation
pub struct PlivoSmsService {
    client: Client,
    config: PlivoConfig,
}

impl PlivoSmsService {
    pub fn new(config: PlivoConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()?;

        info!(
            from = %mask_phone_number(&config.from_number),
            "Plivo SMS service initialized"
        );

        Ok(Self { client, config })
    }

    async fn send_message(&self, to: &str, text: &str) -> Result<String, InfrastructureError> {
        let body = PlivoMessageRequest {
            src: &self.config.from_number,
            dst: to,
            text,
        };

        let response = self
            .client
            .post(self.config.message_url())
            .basic_auth(&self.config.auth_id, Some(&self.config.auth_token))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload = response.text().await?;
        let message_id = parse_message_response(status, &payload)?;

        info!(
            provider = "plivo",
            phone = %mask_phone_number(to),
            message_id = %message_id,
            "SMS accepted by Plivo"
        );

        Ok(message_id)
    }
}

/// Extract the message id from a Plivo reply
pub(crate) fn parse_message_response(status: StatusCode, payload: &str) -> Result<String, InfrastructureError> {
    if !status.is_success() {
        let reason = serde_json::from_str::<PlivoErrorResponse>(payload)
            .map(|e| e.error)
            .unwrap_or_else(|_| payload.chars().take(200).collect());
        return Err(InfrastructureError::Sms(format!(
            "Plivo rejected message ({}): {}",
            status.as_u16(),
            reason
        )));
    }

    let parsed: PlivoMessageResponse = serde_json::from_str(payload)
        .map_err(|e| InfrastructureError::Sms(format!("Malformed Plivo response: {}", e)))?;

    parsed
        .message_uuid
        .into_iter()
        .next()
        .ok_or_else(|| InfrastructureError::Sms("Plivo response carried no message_uuid".to_string()))
}

#[async_trait]
impl SmsServiceTrait for PlivoSmsService {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, String> {
        self.send_sms(phone, &render_otp_message(code)).await
    }

    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        self.send_message(phone, message).await.map_err(|e| {
            error!(
                provider = "plivo",
                phone = %mask_phone_number(phone),
                error = %e,
                "Failed to send SMS"
            );
            e.to_string()
        })
    }

    fn provider_name(&self) -> &str {
        "plivo"
    }

    fn sender_number(&self) -> &str {
        &self.config.from_number
    }
}
