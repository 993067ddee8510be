//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tenancy_resolutions_total` (counter): by classification, site, theme
//! - `tenancy_requests_total` (counter): HTTP requests by route, response status
//! - `tenancy_request_duration_seconds` (histogram): latency by route
//! - `tenancy_config_reloads_total` (counter): by outcome
//!
//! # Design Decisions
//! - `metrics` facade; recording is a no-op until an exporter is installed
//! - Prometheus exporter serves its own HTTP listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::Resolution;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolution(resolution: &Resolution) {
    counter!(
        "tenancy_resolutions_total",
        "classification" => resolution.classification.as_str(),
        "site" => resolution.site.as_str(),
        "theme" => resolution.theme.label()
    )
    .increment(1);
}

pub fn record_request(endpoint: &str, status: u16, start: Instant) {
    counter!(
        "tenancy_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("tenancy_request_duration_seconds", "endpoint" => endpoint.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_reload(success: bool) {
    counter!(
        "tenancy_config_reloads_total",
        "outcome" => if success { "success" } else { "failure" }
    )
    .increment(1);
}
