//! Metrics collection and exposition.
//!
//! # Metrics
//! - `delivery_requests_total` (counter): requests by endpoint, outcome
//! - `delivery_evaluation_duration_seconds` (histogram): handler latency
//! - `delivery_zones_active` (gauge): active zones in the current catalog
//! - `delivery_config_reloads_total` (counter): reloads by result

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Outcome label of one delivery request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Serviceable,
    NotServiceable,
    Rejected,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Serviceable => "serviceable",
            Self::NotServiceable => "not_serviceable",
            Self::Rejected => "rejected",
        }
    }
}

pub fn record_request(endpoint: &'static str, outcome: Outcome, start: Instant) {
    counter!("delivery_requests_total", "endpoint" => endpoint, "outcome" => outcome.as_str())
        .increment(1);
    histogram!("delivery_evaluation_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_active_zones(count: usize) {
    gauge!("delivery_zones_active").set(count as f64);
}

pub fn record_config_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    counter!("delivery_config_reloads_total", "result" => result).increment(1);
}
