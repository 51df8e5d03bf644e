//! Integration tests for the `/api/callback` routes

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use std::sync::Arc;

use og_api::create_app;
use og_shared::config::CorsConfig;

use common::{gateway, state, RecordingSms, PHONE};

#[actix_web::test]
async fn test_callback_lifecycle() {
    let app = test::init_service(create_app(
        state(gateway(Arc::new(RecordingSms::default()), None, false)),
        &CorsConfig::default(),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/callback/request")
        .set_json(json!({ "phone_number": PHONE, "message": "Call me about my order", "priority": "high" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Callback request received successfully");
    assert_eq!(body["status"], "requested");
    let request_id = body["request_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/callback/status/{}", request_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["phone_number"], PHONE);
    assert_eq!(body["priority"], "high");

    let req = test::TestRequest::put()
        .uri(&format!("/api/callback/status/{}", request_id))
        .set_json(json!({ "status": "in_progress" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "in_progress");
}

#[actix_web::test]
async fn test_callback_defaults_priority() {
    let app = test::init_service(create_app(
        state(gateway(Arc::new(RecordingSms::default()), None, false)),
        &CorsConfig::default(),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/callback/request")
        .set_json(json!({ "phone_number": PHONE }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let request_id = body["request_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/callback/status/{}", request_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["priority"], "normal");
}

#[actix_web::test]
async fn test_callback_lookup_errors() {
    let app = test::init_service(create_app(
        state(gateway(Arc::new(RecordingSms::default()), None, false)),
        &CorsConfig::default(),
    ))
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/callback/status/{}", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");

    let req = test::TestRequest::get()
        .uri("/api/callback/status/not-a-uuid")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_callback_status_update_rules() {
    let app = test::init_service(create_app(
        state(gateway(Arc::new(RecordingSms::default()), None, false)),
        &CorsConfig::default(),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/callback/request")
        .set_json(json!({ "phone_number": PHONE }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let request_id = body["request_id"].as_str().unwrap().to_string();

    // `requested` is only ever set on creation
    let req = test::TestRequest::put()
        .uri(&format!("/api/callback/status/{}", request_id))
        .set_json(json!({ "status": "requested" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    // Unknown status names fail deserialization
    let req = test::TestRequest::put()
        .uri(&format!("/api/callback/status/{}", request_id))
        .set_json(json!({ "status": "archived" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/callback/status/{}", uuid::Uuid::new_v4()))
        .set_json(json!({ "status": "completed" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_callback_rejects_invalid_phone() {
    let app = test::init_service(create_app(
        state(gateway(Arc::new(RecordingSms::default()), None, false)),
        &CorsConfig::default(),
    ))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/callback/request")
        .set_json(json!({ "phone_number": "555-0100" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["details"]["fields"]["phone_number"].is_array());
}
