#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error as ActixError};
use items_api::infra::db::ensure_schema;
use items_api::middleware::request_metrics::RequestMetrics;
use items_api::routes;
use items_api::state::app_state::AppState;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

// Logging is auto-installed for each test binary.
#[ctor::ctor]
fn init_logging() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// In-memory SQLite pool with the items schema created.
///
/// The pool is capped at one connection: each SQLite in-memory connection is
/// its own database, so a larger pool would hand out empty databases.
pub async fn memory_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.min_connections(1).max_connections(1).sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .expect("connect to in-memory sqlite");
    ensure_schema(&db).await.expect("create items schema");
    db
}

/// AppState over a fresh in-memory database.
pub async fn test_state() -> AppState {
    AppState::new(
        memory_db().await,
        items_api::metrics::install().expect("install metrics recorder"),
    )
}

/// AppState over an arbitrary connection (e.g. a MockDatabase that fails
/// queries, to exercise storage-down paths).
pub fn state_with_db(db: DatabaseConnection) -> AppState {
    AppState::new(
        db,
        items_api::metrics::install().expect("install metrics recorder"),
    )
}

/// Initialized Actix test service running the production route table behind
/// the request-instrumentation middleware.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError> {
    test::init_service(
        App::new()
            .wrap(RequestMetrics)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}
