//! Unit tests for the Plivo provider

use og_core::services::otp::SmsServiceTrait;
use og_shared::config::{SmsConfig, SmsProvider};
use reqwest::StatusCode;

use crate::sms::plivo::{parse_message_response, PlivoMessageRequest};
use crate::sms::{PlivoConfig, PlivoSmsService};
use crate::InfrastructureError;

fn sms_config() -> SmsConfig {
    SmsConfig {
        provider: SmsProvider::Plivo,
        auth_id: "MAXXXXXXXXXXXXXXXXXX".to_string(),
        auth_token: "secret".to_string(),
        from_number: "+15550001111".to_string(),
        request_timeout_secs: 2,
    }
}

#[test]
fn test_config_from_sms_config() {
    let config = PlivoConfig::from_sms_config(&sms_config()).unwrap();
    assert_eq!(
        config.message_url(),
        "https://api.plivo.com/v1/Account/MAXXXXXXXXXXXXXXXXXX/Message/"
    );
    assert_eq!(config.request_timeout_secs, 2);
}

#[test]
fn test_config_requires_credentials() {
    let config = SmsConfig {
        auth_token: String::new(),
        ..sms_config()
    };
    assert!(matches!(
        PlivoConfig::from_sms_config(&config),
        Err(InfrastructureError::Config(_))
    ));
}

#[test]
fn test_config_requires_e164_sender() {
    let config = SmsConfig {
        from_number: "15550001111".to_string(),
        ..sms_config()
    };
    let err = PlivoConfig::from_sms_config(&config).unwrap_err();
    assert!(err.to_string().contains("E.164"));
}

#[test]
fn test_request_body_shape() {
    let body = PlivoMessageRequest {
        src: "+15550001111",
        dst: "+15551230000",
        text: "hi",
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"src": "+15550001111", "dst": "+15551230000", "text": "hi"})
    );
}

#[test]
fn test_parse_accepted_response() {
    let payload = r#"{"api_id":"a1","message":"message(s) queued","message_uuid":["db3ce55a-7f1d-11e1-8ea7-1231380bc196"]}"#;
    let id = parse_message_response(StatusCode::ACCEPTED, payload).unwrap();
    assert_eq!(id, "db3ce55a-7f1d-11e1-8ea7-1231380bc196");
}

#[test]
fn test_parse_error_response() {
    let payload = r#"{"api_id":"a1","error":"authentication failed"}"#;
    let err = parse_message_response(StatusCode::UNAUTHORIZED, payload).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("401"));
    assert!(text.contains("authentication failed"));
}

#[test]
fn test_parse_response_without_uuid() {
    let err = parse_message_response(StatusCode::ACCEPTED, r#"{"message_uuid":[]}"#).unwrap_err();
    assert!(matches!(err, InfrastructureError::Sms(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_an_error() {
    let mut config = PlivoConfig::from_sms_config(&sms_config()).unwrap();
    config.base_url = "http://127.0.0.1:1".to_string();
    let service = PlivoSmsService::new(config).unwrap();

    let result = service.send_otp("+15551230000", "123456").await;
    assert!(result.is_err());
    assert_eq!(service.provider_name(), "plivo");
}
