//! OTP and free-form SMS endpoints

use actix_web::{web, HttpResponse};
use chrono::Utc;
use validator::Validate;

use og_core::services::SendOtpOutcome;
use og_shared::utils::mask_phone_number;

use crate::app::AppState;
use crate::dto::{
    validate_phone_number, SendOtpRequest, SendOtpResponse, SendSmsRequest, SendSmsResponse, VerifyOtpRequest,
    VerifyOtpResponse,
};
use crate::handlers::{handle_domain_error, validation_error_response};

/// POST /api/sms/send-otp
///
/// Issues a code, or reports the outstanding one while it is inside the
/// resend cooldown. Both cases answer 200 and differ by `already_sent`.
pub async fn send_otp(state: web::Data<AppState>, request: web::Json<SendOtpRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.gateway.send_otp(&request.phone_number).await {
        Ok(result) => {
            let already_sent = result.outcome == SendOtpOutcome::AlreadySent;
            let message = if already_sent {
                "OTP already sent. Please wait before requesting a new one."
            } else {
                "OTP sent successfully"
            };

            HttpResponse::Ok().json(SendOtpResponse {
                success: true,
                message: message.to_string(),
                already_sent,
                expires_at: result.expires_at,
                otp: result.code,
            })
        }
        Err(e) => handle_domain_error(e),
    }
}

/// POST /api/sms/verify-otp
///
/// A wrong, expired or exhausted code is a normal negative answer:
/// 200 with `valid: false` and a message saying why.
pub async fn verify_otp(state: web::Data<AppState>, request: web::Json<VerifyOtpRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.gateway.verify_otp(&request.phone_number, &request.otp).await {
        Ok(result) => {
            let valid = result.is_valid();
            HttpResponse::Ok().json(VerifyOtpResponse {
                success: valid,
                valid,
                message: result.message(),
            })
        }
        Err(e) => handle_domain_error(e),
    }
}

/// POST /api/sms/send-sms
pub async fn send_sms(state: web::Data<AppState>, request: web::Json<SendSmsRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.gateway.send_sms(&request.phone_number, &request.message).await {
        Ok(result) => HttpResponse::Ok().json(SendSmsResponse {
            success: true,
            message: "SMS sent successfully".to_string(),
            id: result.message_id.to_string(),
            provider_message_id: Some(result.provider_message_id),
            timestamp: Utc::now(),
        }),
        Err(e) => handle_domain_error(e),
    }
}

/// GET /api/sms/otp-status/{phone}
pub async fn otp_status(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let phone = path.into_inner();
    if let Err(error) = validate_phone_number(&phone) {
        let mut errors = validator::ValidationErrors::new();
        errors.add("phone_number", error);
        return validation_error_response(&errors);
    }

    match state.gateway.otp_status(&phone).await {
        Ok(status) => {
            tracing::debug!(phone = %mask_phone_number(&phone), active = status.has_active_otp, "OTP status read");
            HttpResponse::Ok().json(status)
        }
        Err(e) => handle_domain_error(e),
    }
}
