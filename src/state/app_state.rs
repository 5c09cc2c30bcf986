use std::time::Instant;

use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;

/// Application state containing shared resources.
///
/// Shared across workers behind `web::Data`'s `Arc`, so the struct itself
/// is never cloned. (`DatabaseConnection` loses its `Clone` impl when the
/// dev-only `mock` feature is enabled.)
pub struct AppState {
    /// Shared connection pool over the items table
    pub db: DatabaseConnection,
    /// Render handle for the installed Prometheus recorder
    pub metrics: PrometheusHandle,
    /// Process start marker, read by the uptime gauge on each scrape
    pub started_at: Instant,
}

impl AppState {
    pub fn new(db: DatabaseConnection, metrics: PrometheusHandle) -> Self {
        Self {
            db,
            metrics,
            started_at: Instant::now(),
        }
    }
}
