//! Callback request endpoints

use actix_web::{web, HttpResponse};
use chrono::Utc;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{CallbackRequestDto, CallbackResponse, UpdateCallbackStatusRequest};
use crate::handlers::{handle_domain_error, validation_error_response};

/// POST /api/callback/request
pub async fn request_callback(state: web::Data<AppState>, request: web::Json<CallbackRequestDto>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let request = request.into_inner();
    match state
        .gateway
        .request_callback(&request.phone_number, request.message.as_deref(), request.priority)
        .await
    {
        Ok(callback) => HttpResponse::Ok().json(CallbackResponse {
            success: true,
            message: "Callback request received successfully".to_string(),
            request_id: callback.id.to_string(),
            status: callback.status,
            timestamp: Utc::now(),
        }),
        Err(e) => handle_domain_error(e),
    }
}

/// GET /api/callback/status/{request_id}
pub async fn get_callback_status(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match state.gateway.get_callback_status(&path.into_inner()).await {
        Ok(callback) => HttpResponse::Ok().json(callback),
        Err(e) => handle_domain_error(e),
    }
}

/// PUT /api/callback/status/{request_id}
pub async fn update_callback_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<UpdateCallbackStatusRequest>,
) -> HttpResponse {
    match state
        .gateway
        .update_callback_status(&path.into_inner(), request.status)
        .await
    {
        Ok(callback) => HttpResponse::Ok().json(callback),
        Err(e) => handle_domain_error(e),
    }
}
