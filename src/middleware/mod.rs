pub mod cors;
pub mod request_metrics;
