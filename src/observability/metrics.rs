//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bootstrap_steps_total` (counter): step executions by step, outcome
//! - `bootstrap_step_duration_seconds` (histogram): time spent per step
//! - `bootstrap_ready` (gauge): 1 once every step has completed
//! - `http_requests_total` (counter): page server requests by path

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::session::BootstrapStep;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one bootstrap step.
pub fn record_step(step: BootstrapStep, success: bool, elapsed: Duration) {
    let outcome = if success { "ok" } else { "error" };
    metrics::counter!("bootstrap_steps_total", "step" => step.as_str(), "outcome" => outcome)
        .increment(1);
    metrics::histogram!("bootstrap_step_duration_seconds", "step" => step.as_str())
        .record(elapsed.as_secs_f64());
}

/// Flag whether the session is ready.
pub fn record_ready(ready: bool) {
    metrics::gauge!("bootstrap_ready").set(if ready { 1.0 } else { 0.0 });
}

/// Count a served request.
pub fn record_request(path: &'static str) {
    metrics::counter!("http_requests_total", "path" => path).increment(1);
}
