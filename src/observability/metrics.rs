//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hexnet_conversions_total` (counter): conversions by `kind`
//!   (encode, decode, line) and `outcome` (ok or error kind)
//! - `hexnet_records_decoded_total` (counter): records recovered from streams
//! - `hexnet_request_duration_seconds` (histogram): HTTP handler latency by path

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_conversion(kind: &'static str, outcome: &'static str) {
    metrics::counter!("hexnet_conversions_total", "kind" => kind, "outcome" => outcome).increment(1);
}

pub fn record_decoded(records: usize) {
    metrics::counter!("hexnet_records_decoded_total").increment(records as u64);
}

pub fn record_request(path: String, status: u16, start: Instant) {
    metrics::histogram!(
        "hexnet_request_duration_seconds",
        "path" => path,
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
