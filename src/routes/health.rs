use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::error;

use crate::db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Service banner.
pub async fn root() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "message": "Items API",
        "version": env!("CARGO_PKG_VERSION"),
        "health": "/health",
        "metrics": "/metrics",
    })))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    database: String,
}

/// Health probe. Always 200; the payload carries the signal, not the HTTP
/// status.
pub async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let now = OffsetDateTime::now_utc();
    let timestamp = now
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let connected = match db::probe(&app_state.db).await {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, "database health check failed");
            false
        }
    };

    let response = HealthResponse {
        status: if connected { "healthy" } else { "unhealthy" }.to_string(),
        timestamp,
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected {
            "connected"
        } else {
            "disconnected"
        }
        .to_string(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Readiness probe. 503 while storage is unreachable so orchestrators hold
/// traffic back, unlike `/health` which only reports.
pub async fn ready(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    if let Err(e) = db::probe(&app_state.db).await {
        error!(error = %e, "readiness check failed");
        return Err(AppError::unavailable("Service not ready"));
    }
    Ok(HttpResponse::Ok().json(json!({ "status": "ready" })))
}

/// Liveness probe. No storage access; only proves the process can respond.
pub async fn live() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({ "status": "alive" })))
}
