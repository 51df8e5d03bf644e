use og_core::services::otp::SmsServiceTrait;

use crate::sms::MockSmsService;

#[tokio::test]
async fn test_mock_returns_prefixed_ids() {
    let service = MockSmsService::default();

    let id = service.send_otp("+15551230000", "123456").await.unwrap();
    assert!(id.starts_with("mock_"));

    let other = service.send_sms("+15551230000", "hello").await.unwrap();
    assert_ne!(id, other);
    assert_eq!(service.get_message_count(), 2);
}

#[tokio::test]
async fn test_mock_failure_simulation() {
    let service = MockSmsService::new("+15550000000");
    service.set_simulate_failure(true);

    assert!(service.send_sms("+15551230000", "hello").await.is_err());
    assert_eq!(service.get_message_count(), 0);

    service.set_simulate_failure(false);
    assert!(service.send_sms("+15551230000", "hello").await.is_ok());
}

#[test]
fn test_mock_identity() {
    let service = MockSmsService::new("+15550000000");
    assert_eq!(service.provider_name(), "mock");
    assert_eq!(service.sender_number(), "+15550000000");
}
