//! Prometheus metrics for the analysis service
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If initialization fails, metrics operations become no-ops.

use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec,
    TextEncoder,
};
use std::sync::OnceLock;

/// Container for all service metrics
struct ServiceMetrics {
    api_requests: CounterVec,
    api_duration: HistogramVec,
    analyses: CounterVec,
    crisis_detections: CounterVec,
    inference_failures: CounterVec,
}

/// Global storage for service metrics
static SERVICE_METRICS: OnceLock<ServiceMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

/// Initialize all Prometheus metrics.
///
/// Should be called once at application startup. If registration fails,
/// errors are logged and subsequent metric operations become no-ops.
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    // Prevent double initialization
    if METRICS_INIT_ATTEMPTED.get().is_some() {
        return Ok(());
    }
    METRICS_INIT_ATTEMPTED.set(true).ok();

    let metrics = ServiceMetrics {
        api_requests: register_counter_vec!(
            "kokoro_api_requests_total",
            "Total API requests by endpoint and status",
            &["endpoint", "status"]
        )?,
        api_duration: register_histogram_vec!(
            "kokoro_api_request_duration_seconds",
            "API request duration in seconds",
            &["endpoint"],
            vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
        )?,
        analyses: register_counter_vec!(
            "kokoro_analyses_total",
            "Total mood analyses by sentiment label",
            &["sentiment"]
        )?,
        crisis_detections: register_counter_vec!(
            "kokoro_crisis_detections_total",
            "Total crisis assessments by risk level",
            &["risk_level"]
        )?,
        inference_failures: register_counter_vec!(
            "kokoro_inference_failures_total",
            "Total inference backend failures by kind",
            &["kind"]
        )?,
    };

    SERVICE_METRICS
        .set(metrics)
        .map_err(|_| "Service metrics already initialized")?;

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record an API request outcome.
///
/// Counts only; durations are observed by [`MetricsTimer`] so the
/// histogram gets exactly one sample per timed request.
pub fn record_api_request(endpoint: &str, status: u16) {
    if let Some(m) = SERVICE_METRICS.get() {
        let status_str = status.to_string();
        m.api_requests
            .with_label_values(&[endpoint, &status_str])
            .inc();
    }
}

/// Record a completed mood analysis
pub fn record_analysis(sentiment: &str) {
    if let Some(m) = SERVICE_METRICS.get() {
        m.analyses.with_label_values(&[sentiment]).inc();
    }
}

/// Record a crisis assessment result
pub fn record_crisis_detection(risk_level: &str) {
    if let Some(m) = SERVICE_METRICS.get() {
        m.crisis_detections.with_label_values(&[risk_level]).inc();
    }
}

/// Record an inference backend failure
pub fn record_inference_failure(kind: &str) {
    if let Some(m) = SERVICE_METRICS.get() {
        m.inference_failures.with_label_values(&[kind]).inc();
    }
}

/// Histogram timer guard that records duration on drop
pub struct MetricsTimer {
    timer: Option<prometheus::HistogramTimer>,
}

impl MetricsTimer {
    fn new(timer: prometheus::HistogramTimer) -> Self {
        Self { timer: Some(timer) }
    }

    /// Create a no-op timer when metrics are not initialized
    fn noop() -> Self {
        Self { timer: None }
    }
}

impl Drop for MetricsTimer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop_and_record();
        }
    }
}

/// Start an API request timer (returns a timer handle)
pub fn start_request_timer(endpoint: &str) -> MetricsTimer {
    match SERVICE_METRICS.get() {
        Some(m) => MetricsTimer::new(
            m.api_duration.with_label_values(&[endpoint]).start_timer(),
        ),
        None => MetricsTimer::noop(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_operations_are_noop_before_init() {
        record_api_request("/api/health", 200);
        record_analysis("POSITIVE");
        record_crisis_detection("HIGH");
        record_inference_failure("timeout");
        let _timer = start_request_timer("/api/health");
    }

    #[test]
    #[serial]
    fn test_init_and_encode() {
        init_metrics().unwrap();
        record_analysis("NEUTRAL");
        let encoded = encode_metrics().unwrap();
        assert!(encoded.contains("kokoro_analyses_total"));
    }

    #[test]
    #[serial]
    fn test_request_counter_leaves_duration_to_the_timer() {
        init_metrics().unwrap();

        record_api_request("/count-only", 200);
        let encoded = encode_metrics().unwrap();
        assert!(encoded.contains("endpoint=\"/count-only\",status=\"200\""));
        assert!(!encoded.contains("duration_seconds_count{endpoint=\"/count-only\"}"));

        {
            let _timer = start_request_timer("/timed");
        }
        let encoded = encode_metrics().unwrap();
        assert!(encoded.contains("duration_seconds_count{endpoint=\"/timed\"} 1"));
    }
}
