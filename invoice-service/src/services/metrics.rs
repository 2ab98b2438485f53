//! Prometheus recorder and invoice-specific metrics.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Call once at startup, before any metric
/// is recorded.
pub fn init_metrics() {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_invoice_generated(layout: &str, pages: usize, elapsed: Duration) {
    counter!("invoices_generated_total", "layout" => layout.to_string()).increment(1);
    histogram!("invoice_pages", "layout" => layout.to_string()).record(pages as f64);
    histogram!("invoice_render_duration_seconds", "layout" => layout.to_string())
        .record(elapsed.as_secs_f64());
}

pub fn record_validation_failure(layout: &str, error_count: usize) {
    counter!("invoice_validation_failures_total", "layout" => layout.to_string()).increment(1);
    histogram!("invoice_validation_errors", "layout" => layout.to_string())
        .record(error_count as f64);
}
