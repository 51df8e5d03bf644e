//! Application assembly: shared state, route table and middleware stack

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use og_core::services::GatewayService;
use og_shared::config::CorsConfig;

use crate::handlers::{json_error_handler, not_found, path_error_handler, query_error_handler};
use crate::middleware::create_cors;
use crate::routes::{callback, health, logs, sms};

/// Largest JSON body accepted
const JSON_LIMIT_BYTES: usize = 16 * 1024;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn GatewayService>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn GatewayService>) -> Self {
        Self { gateway }
    }
}

/// Register every route under `/api`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/sms")
                    .route("/send-otp", web::post().to(sms::send_otp))
                    .route("/verify-otp", web::post().to(sms::verify_otp))
                    .route("/send-sms", web::post().to(sms::send_sms))
                    .route("/otp-status/{phone}", web::get().to(sms::otp_status)),
            )
            .service(
                web::scope("/callback")
                    .route("/request", web::post().to(callback::request_callback))
                    .route("/status/{request_id}", web::get().to(callback::get_callback_status))
                    .route("/status/{request_id}", web::put().to(callback::update_callback_status)),
            )
            .route("/logs", web::get().to(logs::get_logs))
            .route("/health", web::get().to(health::health_check)),
    );
}

/// Build the application with request tracing, CORS and the error envelopes
pub fn create_app(
    state: AppState,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(
            web::JsonConfig::default()
                .limit(JSON_LIMIT_BYTES)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .configure(configure_routes)
        .default_service(web::route().to(not_found))
}
