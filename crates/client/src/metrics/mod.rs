//! Metrics and observability utilities
//!
//! Counters and latency histograms for the client's collaborator calls and
//! credit-moving actions, on the metrics-rs facade.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Noteshare client metrics
pub const METRICS_PREFIX: &str = "noteshare";

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_api_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total collaborator requests issued"
    );

    describe_histogram!(
        format!("{}_api_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Collaborator request latency in seconds"
    );

    describe_counter!(
        format!("{}_downloads_total", METRICS_PREFIX),
        Unit::Count,
        "Total downloads by outcome (free, paid, refused)"
    );

    describe_counter!(
        format!("{}_uploads_total", METRICS_PREFIX),
        Unit::Count,
        "Total upload attempts by status"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record collaborator request metrics
pub struct RequestTimer {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestTimer {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion; status 0 means a transport failure
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_api_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_api_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Record a download by outcome
pub fn record_download(outcome: &str) {
    counter!(
        format!("{}_downloads_total", METRICS_PREFIX),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

/// Record an upload attempt
pub fn record_upload(success: bool) {
    let status = if success { "success" } else { "error" };
    counter!(
        format!("{}_uploads_total", METRICS_PREFIX),
        "status" => status.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_timer() {
        let timer = RequestTimer::start("GET", "/notes");
        std::thread::sleep(std::time::Duration::from_millis(5));
        timer.finish(200);
        // Just verify it runs without panic
    }
}
