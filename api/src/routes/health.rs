use actix_web::{web, HttpResponse};

use crate::app::AppState;

/// GET /api/health
///
/// 503 only when a component is unhealthy; a degraded gateway still serves.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let report = state.gateway.health().await;
    if report.is_serving() {
        HttpResponse::Ok().json(report)
    } else {
        HttpResponse::ServiceUnavailable().json(report)
    }
}
