//! Unit tests for callback and SMS entities

use chrono::Utc;

use crate::domain::entities::{CallbackPriority, CallbackRequest, CallbackStatus, SmsMessage, SmsStatus};

#[test]
fn test_new_callback_is_requested() {
    let callback = CallbackRequest::new("+15551230000", "please call", CallbackPriority::default(), Utc::now());

    assert_eq!(callback.status, CallbackStatus::Requested);
    assert_eq!(callback.priority, CallbackPriority::Normal);
    assert_eq!(callback.requested_at, callback.created_at);
}

#[test]
fn test_callback_status_round_trips_through_str() {
    for status in [
        CallbackStatus::Requested,
        CallbackStatus::InProgress,
        CallbackStatus::Completed,
        CallbackStatus::Cancelled,
    ] {
        assert_eq!(status.as_str().parse::<CallbackStatus>().unwrap(), status);
    }
    assert!(!CallbackStatus::Requested.is_assignable());
    assert!(CallbackStatus::Cancelled.is_assignable());
}

#[test]
fn test_sms_message_transitions() {
    let now = Utc::now();
    let mut sms = SmsMessage::pending("+10000000000", "+15551230000", "hello", "mock", now);
    assert_eq!(sms.status, SmsStatus::Pending);

    sms.mark_sent("msg-1", now);
    assert_eq!(sms.status, SmsStatus::Sent);
    assert_eq!(sms.provider_message_id.as_deref(), Some("msg-1"));
    assert_eq!(sms.sent_at, Some(now));
}
