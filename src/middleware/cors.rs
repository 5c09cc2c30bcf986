use actix_cors::Cors;

/// Permissive CORS: any origin, any method, any header. This mirrors the
/// service's wildcard development default; tighten before exposing publicly.
pub fn cors_middleware() -> Cors {
    Cors::permissive()
}
