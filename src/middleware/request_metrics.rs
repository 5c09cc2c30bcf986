use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::metrics::record_request;

/// Request instrumentation: one counter increment keyed by
/// (method, endpoint, status) and one duration observation keyed by
/// (method, endpoint) per request, recorded exactly once on success and
/// error paths alike. Also emits the `request_completed` log line.
///
/// The endpoint label is the matched route pattern (e.g. `/items/{id}`) so
/// path parameters don't explode label cardinality; unmatched requests fall
/// back to the raw path.
pub struct RequestMetrics;

impl<S, B> Transform<S, ServiceRequest> for RequestMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = RequestMetricsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestMetricsMiddleware { service }))
    }
}

pub struct RequestMetricsMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestMetricsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, endpoint) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request().match_pattern().unwrap_or_else(|| path.clone()),
                ),
                Err(err) => (err.as_response_error().status_code(), path.clone()),
            };

            record_request(&method, &endpoint, status.as_u16(), start);

            let duration_us = start.elapsed().as_micros() as u64;
            let status_code = status.as_u16();

            if status.is_server_error() {
                error!(http.method=%method, url.path=%endpoint, http.status_code=%status_code, duration_us=%duration_us, message="request_completed");
            } else if status.is_client_error() {
                warn!(http.method=%method, url.path=%endpoint, http.status_code=%status_code, duration_us=%duration_us, message="request_completed");
            } else {
                info!(http.method=%method, url.path=%endpoint, http.status_code=%status_code, duration_us=%duration_us, message="request_completed");
            }

            result
        })
    }
}
