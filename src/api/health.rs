use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,
    pub service: String,
    pub version: String,
    /// `connected` or `unavailable`
    pub database: String,
    pub environment: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database_up = match state.users.ping().await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("⚠️  Health check: database ping failed: {}", e);
            false
        }
    };

    let body = HealthResponse {
        status: if database_up { "healthy" } else { "degraded" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database_up { "connected" } else { "unavailable" }.to_string(),
        environment: format!("{:?}", state.config.environment).to_lowercase(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    if database_up {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
