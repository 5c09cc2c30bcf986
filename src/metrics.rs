//! Prometheus metric definitions and recording helpers.
//!
//! Scrape contract:
//! - `http_requests_total{method, endpoint, status_code}` counter
//! - `http_request_duration_seconds{method, endpoint}` histogram
//! - `database_items_total`, `database_status`, `app_uptime_seconds` gauges
//! - `app_info{version, environment}` static info gauge

use std::time::Instant;

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use sea_orm::DatabaseConnection;
use tracing::error;

use crate::error::AppError;
use crate::repos;
use crate::state::app_state::AppState;

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
pub const DATABASE_ITEMS_TOTAL: &str = "database_items_total";
pub const DATABASE_STATUS: &str = "database_status";
pub const APP_UPTIME_SECONDS: &str = "app_uptime_seconds";
pub const APP_INFO: &str = "app_info";

/// Duration buckets; without explicit buckets the exporter would render the
/// request-duration metric as a summary instead of a histogram.
const DURATION_SECONDS_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

static RECORDER: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the process-wide Prometheus recorder and return its render handle.
///
/// The recorder can only be installed once per process; later calls (test
/// binaries build several apps) return the handle installed first.
pub fn install() -> Result<PrometheusHandle, AppError> {
    RECORDER
        .get_or_try_init(|| {
            let handle = PrometheusBuilder::new()
                .set_buckets(DURATION_SECONDS_BUCKETS)
                .map_err(|e| AppError::config(format!("invalid histogram buckets: {e}")))?
                .install_recorder()
                .map_err(|e| {
                    AppError::config(format!("failed to install metrics recorder: {e}"))
                })?;

            describe_counter!(HTTP_REQUESTS_TOTAL, "Total number of HTTP requests");
            describe_histogram!(
                HTTP_REQUEST_DURATION_SECONDS,
                "HTTP request duration in seconds"
            );
            describe_gauge!(DATABASE_ITEMS_TOTAL, "Total number of items in database");
            describe_gauge!(DATABASE_STATUS, "Database connection status (1=up, 0=down)");
            describe_gauge!(APP_UPTIME_SECONDS, "Application uptime in seconds");
            describe_gauge!(APP_INFO, "Application information");

            metrics::gauge!(
                APP_INFO,
                "version" => env!("CARGO_PKG_VERSION"),
                "environment" => "development"
            )
            .set(1.0);

            Ok(handle)
        })
        .cloned()
}

/// Record the per-request counter and duration histogram. Called exactly once
/// per request by the instrumentation middleware.
pub fn record_request(method: &str, endpoint: &str, status: u16, started: Instant) {
    metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string(),
        "status_code" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .record(started.elapsed().as_secs_f64());
}

/// Refresh the storage-backed gauges ahead of a scrape.
///
/// On failure the item-count gauge keeps its last value and `database_status`
/// drops to 0; the failure is logged, never raised, so the scrape endpoint
/// stays available while storage is down.
pub async fn refresh_storage_gauges(state: &AppState) {
    match storage_snapshot(&state.db).await {
        Ok(total) => {
            metrics::gauge!(DATABASE_ITEMS_TOTAL).set(total as f64);
            metrics::gauge!(DATABASE_STATUS).set(1.0);
        }
        Err(e) => {
            error!(error = %e, "failed to refresh storage metrics");
            metrics::gauge!(DATABASE_STATUS).set(0.0);
        }
    }

    metrics::gauge!(APP_UPTIME_SECONDS).set(state.started_at.elapsed().as_secs_f64());
}

async fn storage_snapshot(db: &DatabaseConnection) -> Result<u64, sea_orm::DbErr> {
    let total = repos::items::count(db).await?;
    crate::db::probe(db).await?;
    Ok(total)
}
