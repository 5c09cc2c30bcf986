use actix_web::web;

pub mod health;
pub mod items;
pub mod metrics;

/// Configure the full route table. `main.rs` wraps this with the CORS and
/// request-instrumentation middleware; tests register the same paths so
/// endpoint behavior can be exercised directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health))
        .route("/ready", web::get().to(health::ready))
        .route("/live", web::get().to(health::live))
        .route("/metrics", web::get().to(metrics::scrape))
        .service(web::scope("/items").configure(items::configure_routes));
}
