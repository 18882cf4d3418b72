//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by endpoint and status
//! - `gateway_sanitizer_rejections_total` (counter): rejected inputs by kind
//! - `gateway_audit_events_dropped_total` (counter): audit emissions lost

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Bind the Prometheus exporter.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "failed to start metrics exporter"),
    }
}

pub fn record_request(endpoint: &'static str, status: u16) {
    metrics::counter!(
        "gateway_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_sanitizer_rejection(kind: &'static str) {
    metrics::counter!("gateway_sanitizer_rejections_total", "kind" => kind).increment(1);
}

pub fn record_audit_drop() {
    metrics::counter!("gateway_audit_events_dropped_total").increment(1);
}
