use std::sync::Arc;

use og_shared::types::HealthStatus;
use tokio_util::sync::CancellationToken;

use crate::domain::entities::CallbackStatus;
use crate::services::otp::tests::mocks::MockSmsService;
use crate::services::otp::{SendOtpOutcome, VerifyOtpResult};

use super::{Gateway, GatewayConfig, GatewayDependencies, GatewayService};

fn gateway(sms: Arc<MockSmsService>) -> Gateway {
    Gateway::new(
        GatewayDependencies::in_memory(sms, Some((5, 60))),
        GatewayConfig::default(),
    )
}

#[tokio::test]
async fn test_issue_and_verify_through_facade() {
    let sms = Arc::new(MockSmsService::new(false));
    let gateway = gateway(sms.clone());

    let sent = gateway.send_otp("+15551230000").await.unwrap();
    assert_eq!(sent.outcome, SendOtpOutcome::Sent);

    let code = sms.get_sent_code("+15551230000").unwrap();
    let verified = gateway.verify_otp("+15551230000", &code).await.unwrap();
    assert_eq!(verified, VerifyOtpResult::Verified);
}

#[tokio::test]
async fn test_logs_redact_codes_and_count_sections() {
    let sms = Arc::new(MockSmsService::new(false));
    let gateway = gateway(sms.clone());

    gateway.send_otp("+15551230000").await.unwrap();
    gateway.send_sms("+15551230001", "hello").await.unwrap();
    let callback = gateway.request_callback("+15551230002", None, None).await.unwrap();
    gateway
        .update_callback_status(&callback.id.to_string(), CallbackStatus::Completed)
        .await
        .unwrap();

    let logs = gateway.get_logs(None).await.unwrap();
    assert_eq!(logs.otps.count, 1);
    assert_eq!(logs.sms.count, 1);
    assert_eq!(logs.callbacks.count, 1);
    assert_eq!(logs.total_records, 3);
    assert_eq!(logs.callbacks.data[0].status, CallbackStatus::Completed);

    let json = serde_json::to_string(&logs).unwrap();
    assert!(!json.contains(&sms.get_sent_code("+15551230000").unwrap()));
}

#[tokio::test]
async fn test_health_reflects_reaper_lifecycle() {
    let gateway = gateway(Arc::new(MockSmsService::new(false)));

    assert_eq!(gateway.health().await.status, HealthStatus::Degraded);

    gateway.start(CancellationToken::new()).await;
    let health = gateway.health().await;
    assert_eq!(health.status, HealthStatus::Healthy);
    assert_eq!(health.services["sms"].message.as_deref(), Some("mock"));

    gateway.shutdown().await;
    assert_eq!(gateway.health().await.status, HealthStatus::Degraded);
}
