use std::sync::Arc;
use std::time::Duration;

use crate::clock::ManualClock;
use crate::domain::entities::SmsStatus;
use crate::errors::{DomainError, OtpError};
use crate::repositories::{InMemorySmsRepository, SmsRepository};
use crate::services::otp::tests::mocks::MockSmsService;
use crate::services::throttle::SlidingWindowThrottle;

use super::SmsMessageService;

const PHONE: &str = "+15551230000";

fn service(sms: Arc<MockSmsService>, repo: Arc<InMemorySmsRepository>) -> SmsMessageService {
    let clock = ManualClock::default();
    SmsMessageService::new(
        repo,
        sms,
        Arc::new(SlidingWindowThrottle::with_clock(5, 60, Arc::new(clock.clone()))),
        Arc::new(clock),
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn test_send_sms_marks_record_sent() {
    let sms = Arc::new(MockSmsService::new(false));
    let repo = Arc::new(InMemorySmsRepository::new());
    let service = service(sms.clone(), repo.clone());

    let result = service.send_sms(PHONE, "Your technician is on the way").await.unwrap();

    assert_eq!(result.status, SmsStatus::Sent);
    let stored = repo.find_by_id(result.message_id).await.unwrap().unwrap();
    assert_eq!(stored.status, SmsStatus::Sent);
    assert_eq!(stored.provider, "mock");
    assert_eq!(stored.from, "+10000000000");
    assert_eq!(stored.provider_message_id.as_deref(), Some(result.provider_message_id.as_str()));
    assert_eq!(sms.sent_messages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_send_sms_failure_marks_record_failed() {
    let sms = Arc::new(MockSmsService::new(true));
    let repo = Arc::new(InMemorySmsRepository::new());
    let service = service(sms, repo.clone());

    let result = service.send_sms(PHONE, "hello").await;

    assert!(matches!(
        result,
        Err(DomainError::Otp(OtpError::TransportUnavailable { .. }))
    ));
    let stored = repo.find_all(10).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, SmsStatus::Failed);
}

#[tokio::test]
async fn test_send_sms_validates_length() {
    let service = service(Arc::new(MockSmsService::new(false)), Arc::new(InMemorySmsRepository::new()));

    assert!(service.send_sms(PHONE, "").await.is_err());
    assert!(service.send_sms(PHONE, &"x".repeat(161)).await.is_err());
    assert!(service.send_sms(PHONE, &"x".repeat(160)).await.is_ok());
}

#[tokio::test]
async fn test_send_sms_shares_throttle_limit() {
    let service = service(Arc::new(MockSmsService::new(false)), Arc::new(InMemorySmsRepository::new()));

    for _ in 0..5 {
        service.send_sms(PHONE, "hi").await.unwrap();
    }

    assert!(matches!(
        service.send_sms(PHONE, "hi").await,
        Err(DomainError::Otp(OtpError::RateLimited { .. }))
    ));
}
