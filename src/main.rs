use actix_web::{web, App, HttpServer};
use items_api::config::db::database_url;
use items_api::infra::db::{connect_db, RetryPolicy};
use items_api::middleware::cors::cors_middleware;
use items_api::middleware::request_metrics::RequestMetrics;
use items_api::routes;
use items_api::state::app_state::AppState;
use items_api::{metrics, telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("PORT must be a valid port number");
            std::process::exit(1);
        });

    let metrics_handle = match metrics::install() {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to install metrics recorder: {e}");
            std::process::exit(1);
        }
    };

    // Fail-fast: serving without storage is meaningless for this service.
    let db = match connect_db(&database_url(), RetryPolicy::default()).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Could not connect to the database after retries: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(host = %host, port = port, "database connected, starting server");

    let data = web::Data::new(AppState::new(db, metrics_handle));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(RequestMetrics)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
