use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::LogsQuery;
use crate::handlers::handle_domain_error;

/// GET /api/logs?limit=N
pub async fn get_logs(state: web::Data<AppState>, query: web::Query<LogsQuery>) -> HttpResponse {
    match state.gateway.get_logs(query.limit).await {
        Ok(logs) => HttpResponse::Ok().json(logs),
        Err(e) => handle_domain_error(e),
    }
}
