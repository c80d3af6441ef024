//! Predict service command
//!
//! Serves the trained stroke model over HTTP: strict request validation,
//! single-row inference, a synchronous append to the prediction log, and
//! Prometheus counters. The bundle is loaded and validated once at
//! startup; a failure there is fatal.

pub(crate) mod log;
pub(crate) mod types;

pub(crate) use types::ServerConfig;


use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use colored::Colorize;
use ictus::artifact::ModelBundle;
use ictus::clock;
use ictus::primitives::Matrix;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

use self::log::PredictionLog;
use self::types::{AppState, PredictRequest, ServerMetrics};

use crate::error::{CliError, Result};

/// Serve command entry point (blocking)
pub(crate) fn run(model_path: &Path, log_path: &Path, config: &ServerConfig) -> Result<()> {
    println!("{}", "=== Ictus Serve ===".cyan().bold());
    println!();
    println!("Model: {}", model_path.display());
    println!("Log: {}", log_path.display());
    println!("Binding: {}", config.bind_addr());
    println!();

    if !model_path.exists() {
        return Err(CliError::FileNotFound(model_path.to_path_buf()));
    }

    let bundle =
        ModelBundle::load(model_path).map_err(|e| CliError::ModelLoadFailed(e.to_string()))?;
    println!("{}", format!("Model type: {}", bundle.model_type).dimmed());

    let prediction_log = PredictionLog::open(log_path)?;
    let state = Arc::new(AppState {
        bundle,
        log: prediction_log,
        metrics: ServerMetrics::new(),
    });

    println!();
    println!("{}", "Endpoints:".green().bold());
    println!("  POST /predict        - Stroke prediction");
    println!("  GET  /health         - Health check");
    println!("  GET  /metrics        - Prometheus metrics");
    println!();
    println!("{}", "Press Ctrl+C to stop".dimmed());

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::ServerError(format!("Failed to create runtime: {e}")))?;

    let bind_addr = config.bind_addr();
    runtime.block_on(async move {
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| CliError::ServerError(format!("Failed to bind: {e}")))?;

        println!();
        println!(
            "{}",
            format!("Server ready on http://{bind_addr}").green().bold()
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CliError::ServerError(e.to_string()))?;

        println!();
        println!("{}", "Server stopped".yellow());
        Ok(())
    })
}

/// Build the axum router with every endpoint wired to shared state.
fn build_router(state: Arc<AppState>) -> Router {
    let predict_state = state.clone();
    let health_state = state.clone();
    let metrics_state = state;

    Router::new()
        .route(
            "/predict",
            post(move |body: String| {
                let state = predict_state.clone();
                async move {
                    let (status, payload) = handle_predict(&state, &body);
                    (status, Json(payload)).into_response()
                }
            }),
        )
        .route(
            "/health",
            get(move || {
                let state = health_state.clone();
                async move {
                    Json(json!({"status": "ok", "model": state.bundle.model_type}))
                        .into_response()
                }
            }),
        )
        .route(
            "/metrics",
            get(move || {
                let state = metrics_state.clone();
                async move { state.metrics.prometheus_output().into_response() }
            }),
        )
}

/// Validate, predict, and log one request.
///
/// Validation failures are client errors with no side effects; inference
/// and log failures after validation are server errors. The body is
/// parsed here rather than by an extractor so both outcomes flow through
/// the same counters and error shape.
pub(crate) fn handle_predict(state: &AppState, body: &str) -> (StatusCode, serde_json::Value) {
    let request: PredictRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(e) => {
            state.metrics.record_client_error();
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({"error": format!("invalid request: {e}")}),
            );
        }
    };

    let features = request.feature_vector();
    let x = match Matrix::from_vec(1, features.len(), features) {
        Ok(x) => x,
        Err(e) => {
            state.metrics.record_server_error();
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": format!("inference failed: {e}")}),
            );
        }
    };
    let prediction = state.bundle.forest.predict(&x)[0];

    let timestamp = clock::utc_timestamp();
    if let Err(e) = state.log.append(&timestamp, &request, prediction) {
        state.metrics.record_server_error();
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": format!("failed to log prediction: {e}")}),
        );
    }

    state.metrics.record_prediction(prediction);
    (StatusCode::OK, json!({"stroke_prediction": prediction}))
}

/// Resolves when Ctrl+C is received.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
