//! Server type definitions for the predict service

use ictus::artifact::ModelBundle;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::log::PredictionLog;

/// Server configuration
#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    /// Host to bind to
    pub(crate) host: String,
    /// Port to listen on
    pub(crate) port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Create config with custom port (builder pattern, used in tests)
    #[cfg(test)]
    pub(crate) fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Create config with custom host (builder pattern, used in tests)
    #[cfg(test)]
    pub(crate) fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Get bind address
    pub(super) fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Prediction request body.
///
/// Ten features, categoricals as the integer codes assigned during
/// training. Unknown fields are rejected, integer literals are accepted
/// for the float fields, and fractional literals are rejected for the
/// integer fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PredictRequest {
    pub(crate) gender: i64,
    pub(crate) age: f32,
    pub(crate) hypertension: i64,
    pub(crate) heart_disease: i64,
    pub(crate) ever_married: i64,
    pub(crate) work_type: i64,
    pub(crate) residence_type: i64,
    pub(crate) avg_glucose_level: f32,
    pub(crate) bmi: f32,
    pub(crate) smoking_status: i64,
}

impl PredictRequest {
    /// Features in the canonical model column order.
    pub(crate) fn feature_vector(&self) -> Vec<f32> {
        vec![
            self.gender as f32,
            self.age,
            self.hypertension as f32,
            self.heart_disease as f32,
            self.ever_married as f32,
            self.work_type as f32,
            self.residence_type as f32,
            self.avg_glucose_level,
            self.bmi,
            self.smoking_status as f32,
        ]
    }
}

/// Server metrics (thread-safe)
///
/// Counters cover the prediction endpoint only; they are process-local
/// and exposed via the /metrics endpoint.
#[derive(Debug, Default)]
pub(crate) struct ServerMetrics {
    /// Total prediction requests received
    pub(crate) requests_total: AtomicU64,
    /// Predictions returned with class 0
    pub(crate) predictions_no_stroke: AtomicU64,
    /// Predictions returned with class 1
    pub(crate) predictions_stroke: AtomicU64,
    /// Client errors (4xx)
    pub(crate) requests_client_error: AtomicU64,
    /// Server errors (5xx)
    pub(crate) requests_server_error: AtomicU64,
    /// Server start time (for uptime calculation)
    start_time: std::sync::OnceLock<Instant>,
}

impl ServerMetrics {
    /// Create new metrics with server start time
    pub(crate) fn new() -> Arc<Self> {
        let metrics = Arc::new(Self::default());
        let _ = metrics.start_time.set(Instant::now());
        metrics
    }

    /// Record a served prediction by class
    pub(crate) fn record_prediction(&self, class: usize) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        if class == 1 {
            self.predictions_stroke.fetch_add(1, Ordering::Relaxed);
        } else {
            self.predictions_no_stroke.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record client error (4xx)
    pub(crate) fn record_client_error(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.requests_client_error.fetch_add(1, Ordering::Relaxed);
    }

    /// Record server error (5xx)
    pub(crate) fn record_server_error(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.requests_server_error.fetch_add(1, Ordering::Relaxed);
    }

    /// Get uptime in seconds
    pub(crate) fn uptime_seconds(&self) -> u64 {
        self.start_time
            .get()
            .map(|t| t.elapsed().as_secs())
            .unwrap_or(0)
    }

    /// Get Prometheus-format metrics
    ///
    /// Format follows https://prometheus.io/docs/instrumenting/exposition_formats/
    pub(crate) fn prometheus_output(&self) -> String {
        let total = self.requests_total.load(Ordering::Relaxed);
        let no_stroke = self.predictions_no_stroke.load(Ordering::Relaxed);
        let stroke = self.predictions_stroke.load(Ordering::Relaxed);
        let client_errors = self.requests_client_error.load(Ordering::Relaxed);
        let server_errors = self.requests_server_error.load(Ordering::Relaxed);
        let uptime = self.uptime_seconds();

        format!(
            r#"# HELP ictus_requests_total Total number of prediction requests
# TYPE ictus_requests_total counter
ictus_requests_total {total}

# HELP ictus_predictions_total Predictions returned, by class
# TYPE ictus_predictions_total counter
ictus_predictions_total{{class="no_stroke"}} {no_stroke}
ictus_predictions_total{{class="stroke"}} {stroke}

# HELP ictus_requests_client_error Client error requests (4xx)
# TYPE ictus_requests_client_error counter
ictus_requests_client_error {client_errors}

# HELP ictus_requests_server_error Server error requests (5xx)
# TYPE ictus_requests_server_error counter
ictus_requests_server_error {server_errors}

# HELP ictus_uptime_seconds Server uptime in seconds
# TYPE ictus_uptime_seconds gauge
ictus_uptime_seconds {uptime}
"#
        )
    }
}

/// Shared state handed to every request handler.
///
/// The bundle is loaded once at startup and never mutated; the log is
/// the single writer of the prediction CSV; the counters are atomics.
pub(crate) struct AppState {
    pub(crate) bundle: ModelBundle,
    pub(crate) log: PredictionLog,
    pub(crate) metrics: Arc<ServerMetrics>,
}
