#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod infra;
pub mod metrics;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-exports for public API
pub use config::db::database_url;
pub use error::AppError;
pub use infra::db::{connect_db, RetryPolicy};
pub use middleware::cors::cors_middleware;
pub use middleware::request_metrics::RequestMetrics;
pub use state::app_state::AppState;
