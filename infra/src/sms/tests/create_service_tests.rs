use og_shared::config::{SmsConfig, SmsProvider};

use crate::sms::create_sms_service;

#[test]
fn test_mock_provider_selected() {
    let service = create_sms_service(&SmsConfig::default());
    assert_eq!(service.provider_name(), "mock");
    assert_eq!(service.sender_number(), "+10000000000");
}

#[test]
fn test_plivo_provider_selected() {
    let config = SmsConfig {
        provider: SmsProvider::Plivo,
        auth_id: "MAXXXXXXXXXXXXXXXXXX".to_string(),
        auth_token: "secret".to_string(),
        from_number: "+15550001111".to_string(),
        request_timeout_secs: 5,
    };
    let service = create_sms_service(&config);
    assert_eq!(service.provider_name(), "plivo");
    assert_eq!(service.sender_number(), "+15550001111");
}

#[test]
fn test_invalid_plivo_config_falls_back_to_mock() {
    let config = SmsConfig {
        provider: SmsProvider::Plivo,
        ..SmsConfig::default()
    };
    assert_eq!(create_sms_service(&config).provider_name(), "mock");
}
