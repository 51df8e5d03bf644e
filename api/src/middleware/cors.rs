//! CORS configuration for browser clients of the gateway.
//!
//! Origins come from `CorsConfig`: a `*` entry (or an empty list) accepts any
//! origin, otherwise only the listed origins are allowed.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use og_shared::config::CorsConfig;

/// Creates the CORS middleware for the configured origins.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .expose_headers(vec![header::RETRY_AFTER])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::debug!("CORS accepts any origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            tracing::info!(%origin, "Adding allowed origin");
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
