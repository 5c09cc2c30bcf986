use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::metrics;
use crate::state::app_state::AppState;

/// Prometheus text exposition. Storage-backed gauges are refreshed on each
/// scrape; the endpoint stays available when storage is down.
pub async fn scrape(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    metrics::refresh_storage_gauges(&app_state).await;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(app_state.metrics.render()))
}
