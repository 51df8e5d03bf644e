use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use std::collections::HashMap;
use validator::ValidationErrors;

use og_core::errors::{DomainError, OtpError};
use og_shared::errors::{error_codes, ErrorResponse};

/// Convert a domain error into the matching HTTP response
///
/// | error                     | status |
/// |---------------------------|--------|
/// | validation                | 400    |
/// | not found / expired       | 404    |
/// | conflict                  | 409    |
/// | rate limited, max attempts| 429    |
/// | transport, storage        | 503    |
/// | internal                  | 500    |
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } | DomainError::Otp(OtpError::Validation { message }) => {
            tracing::debug!(%message, "Request rejected by validation");
            HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        )),
        DomainError::Conflict { message } => {
            tracing::warn!(%message, "Conflicting write");
            HttpResponse::Conflict().json(ErrorResponse::new(error_codes::CONFLICT, message))
        }
        DomainError::Otp(OtpError::NotFoundOrExpired) => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::OTP_NOT_FOUND_OR_EXPIRED,
            "OTP not found or expired. Please request a new OTP.",
        )),
        DomainError::Otp(OtpError::MaxAttemptsReached) => HttpResponse::TooManyRequests().json(ErrorResponse::new(
            error_codes::OTP_MAX_ATTEMPTS,
            "Maximum verification attempts reached. Please request a new OTP.",
        )),
        DomainError::Otp(OtpError::RateLimited { retry_after_seconds }) => HttpResponse::TooManyRequests()
            .insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()))
            .json(
                ErrorResponse::new(
                    error_codes::RATE_LIMIT_EXCEEDED,
                    format!("Too many requests. Please try again in {} seconds", retry_after_seconds),
                )
                .add_detail("retry_after_seconds", retry_after_seconds),
            ),
        DomainError::Otp(OtpError::TransportUnavailable { message }) => {
            tracing::error!(%message, "SMS transport unavailable");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::SMS_UNAVAILABLE,
                "SMS provider service is currently unavailable",
            ))
        }
        DomainError::Otp(OtpError::StorageUnavailable { message }) => {
            tracing::error!(%message, "Storage unavailable");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::STORAGE_UNAVAILABLE,
                "Storage service is currently unavailable",
            ))
        }
        DomainError::Internal { message } => {
            tracing::error!(%message, "Internal error");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

/// 400 with one entry per invalid field
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }

    tracing::debug!(?fields, "Request body failed validation");

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data").add_detail("fields", fields),
    )
}

fn bad_request(message: String) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message.clone()));
    InternalError::from_response(message, response).into()
}

/// Malformed JSON bodies get the standard error envelope
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(format!("Invalid JSON body: {}", err))
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(format!("Invalid query string: {}", err))
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(format!("Invalid path: {}", err))
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::Validation { message: "x".into() }, StatusCode::BAD_REQUEST),
            (DomainError::NotFound { resource: "callback request".into() }, StatusCode::NOT_FOUND),
            (DomainError::Conflict { message: "x".into() }, StatusCode::CONFLICT),
            (OtpError::NotFoundOrExpired.into(), StatusCode::NOT_FOUND),
            (OtpError::MaxAttemptsReached.into(), StatusCode::TOO_MANY_REQUESTS),
            (DomainError::transport("down"), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::storage("down"), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::Internal { message: "x".into() }, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(handle_domain_error(error).status(), expected);
        }
    }

    #[test]
    fn test_rate_limited_sets_retry_after() {
        let response = handle_domain_error(OtpError::RateLimited { retry_after_seconds: 42 }.into());
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "42");
    }
}
