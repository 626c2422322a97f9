//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mux_requests_total` (counter): requests by resolution outcome and method
//! - `mux_request_duration_seconds` (histogram): time from dispatch to response
//! - `mux_route_reloads_total` (counter): route tables swapped in at runtime
//! - `mux_routes` (gauge): registrations in the table being served
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Labels stay low-cardinality: never the raw path

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record one dispatched request.
pub fn record_request(outcome: &'static str, method: &str, start: Instant) {
    metrics::counter!(
        "mux_requests_total",
        "outcome" => outcome,
        "method" => method.to_string()
    )
    .increment(1);
    metrics::histogram!("mux_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record a route table reload.
pub fn record_reload(routes: usize) {
    metrics::counter!("mux_route_reloads_total").increment(1);
    metrics::gauge!("mux_routes").set(routes as f64);
}
