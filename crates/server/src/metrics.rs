use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder};

use crate::errors::ApiError;

// Prometheus metrics (default registry)
pub static AUTH_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "sso_auth_requests_total",
        "Auth operations by outcome",
        &["op", "outcome"]
    )
    .expect("register auth_requests_total")
});

pub static AUTH_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "sso_auth_request_duration_seconds",
        "Auth operation duration in seconds",
        &["op"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register auth_request_duration")
});

pub fn record<T>(op: &'static str, res: &Result<T, ApiError>, elapsed_secs: f64) {
    let outcome = match res {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    AUTH_REQUESTS_TOTAL.with_label_values(&[op, outcome]).inc();
    AUTH_REQUEST_DURATION.with_label_values(&[op]).observe(elapsed_secs);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
