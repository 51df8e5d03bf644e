use std::sync::Arc;
use std::time::Duration;

use crate::clock::ManualClock;
use crate::domain::entities::{CallbackPriority, CallbackStatus};
use crate::errors::{DomainError, OtpError};
use crate::repositories::InMemoryCallbackRepository;

use super::{CallbackService, DEFAULT_CALLBACK_MESSAGE};

fn service() -> CallbackService {
    CallbackService::new(
        Arc::new(InMemoryCallbackRepository::new()),
        Arc::new(ManualClock::default()),
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn test_request_callback_defaults() {
    let service = service();

    let request = service.request_callback("+15551230000", None, None).await.unwrap();

    assert_eq!(request.status, CallbackStatus::Requested);
    assert_eq!(request.priority, CallbackPriority::Normal);
    assert_eq!(request.message, DEFAULT_CALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_status_lookup_and_update() {
    let service = service();
    let request = service
        .request_callback("+15551230000", Some("Call me about my order"), Some(CallbackPriority::High))
        .await
        .unwrap();
    let id = request.id.to_string();

    let fetched = service.get_callback_status(&id).await.unwrap();
    assert_eq!(fetched, request);

    let updated = service
        .update_callback_status(&id, CallbackStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(updated.status, CallbackStatus::InProgress);
    assert_eq!(service.get_callback_status(&id).await.unwrap().status, CallbackStatus::InProgress);
}

#[tokio::test]
async fn test_requested_status_cannot_be_assigned() {
    let service = service();
    let request = service.request_callback("+15551230000", None, None).await.unwrap();

    let result = service
        .update_callback_status(&request.id.to_string(), CallbackStatus::Requested)
        .await;

    assert!(matches!(result, Err(DomainError::Otp(OtpError::Validation { .. }))));
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let service = service();

    let missing = service.get_callback_status(&uuid::Uuid::new_v4().to_string()).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));

    let malformed = service.get_callback_status("not-a-uuid").await;
    assert!(matches!(malformed, Err(DomainError::Otp(OtpError::Validation { .. }))));

    let update_missing = service
        .update_callback_status(&uuid::Uuid::new_v4().to_string(), CallbackStatus::Completed)
        .await;
    assert!(matches!(update_missing, Err(DomainError::NotFound { .. })));
}
