//! adventure-rest - HTTP adapter for the turn pipeline.
//!
//! Exposes the core turn contract over HTTP:
//! - POST /turns - run one turn (generate narrative, compact history)
//! - GET /health - static readiness check
//!
//! The adapter owns the wire format only. A hard generation failure maps to
//! 502 with a distinct error code; a soft compaction failure stays a 200
//! whose body carries the unchanged history plus a `warning` diagnostic, so
//! front ends can keep the player moving on stale history.

use adventure_core::{Inference, OllamaBackend, TurnError, TurnInput, TurnPipeline};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<TurnPipeline>,
}

impl AppState {
    /// Build state over an explicit backend (tests inject a scripted one).
    pub fn new(backend: Arc<dyn Inference>) -> Self {
        Self {
            pipeline: Arc::new(TurnPipeline::new(backend)),
        }
    }

    /// Build state from the environment:
    /// - `OLLAMA_HOST`: backend base URL (default `http://localhost:11434`)
    /// - `ADVENTURE_MODEL`: model name override
    /// - `ADVENTURE_NUM_PREDICT`: per-completion token cap
    pub fn from_env() -> Self {
        let mut client = ollama::Ollama::from_env();
        if let Ok(model) = std::env::var("ADVENTURE_MODEL") {
            client = client.with_model(model);
        }

        let mut backend = OllamaBackend::new(client);
        if let Some(num_predict) = std::env::var("ADVENTURE_NUM_PREDICT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            backend = backend.with_num_predict(num_predict);
        }

        Self::new(Arc::new(backend))
    }
}

/// Run-turn request.
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub history: String,
    #[serde(default)]
    pub previous_narrative: String,
    pub player_action: String,
}

/// Run-turn response.
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub narrative: String,
    pub updated_history: String,
    /// Present only when compaction failed and `updated_history` is the
    /// input history unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/turns", post(run_turn))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "AI-driven adventure service is running"
}

/// Run one turn through the pipeline.
async fn run_turn(
    State(state): State<AppState>,
    Json(req): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, ApiError> {
    let input = TurnInput::new(req.history, req.previous_narrative, req.player_action);
    let output = state.pipeline.run(input).await?;

    if let Some(ref warning) = output.compaction_error {
        tracing::warn!(%warning, "turn completed with stale history");
    }

    Ok(Json(TurnResponse {
        narrative: output.narrative,
        updated_history: output.updated_history,
        warning: output.compaction_error.map(|e| e.to_string()),
    }))
}

/// API error types.
#[derive(Debug)]
pub enum ApiError {
    Generation(String),
}

impl From<TurnError> for ApiError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::Generation(e) => ApiError::Generation(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Generation(msg) => (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", msg),
        };

        let body = Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}
