//! HTTP boundary: routes, handlers, and the user-facing error contract.
//!
//! Only two failure shapes ever reach a client: 400 for bad input and 500
//! for a failed generation. Persistence failures are logged, never surfaced.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::orchestrator::RequestOrchestrator;
use crate::store::ArtifactPersister;

/// Shared handles for request handlers. Everything per-call is owned; the
/// orchestrator and persister are stateless across invocations.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<RequestOrchestrator>,
    pub persister: Arc<ArtifactPersister>,
}

impl AppState {
    pub fn new(orchestrator: Arc<RequestOrchestrator>, persister: Arc<ArtifactPersister>) -> Self {
        Self {
            orchestrator,
            persister,
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/generate", post(generate_blog))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct GenerateBlogRequest {
    /// Optional in the deserializer so an absent field reaches our
    /// validation instead of a serde rejection with a foreign body.
    #[serde(default)]
    blog_topic: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateBlogResponse {
    message: String,
    blog: String,
    artifact_key: Option<String>,
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /generate` — validate, generate, persist best-effort, respond.
///
/// Validation happens strictly before the orchestrator runs; a persistence
/// failure never downgrades a successful generation to an error response.
async fn generate_blog(
    State(state): State<AppState>,
    Json(request): Json<GenerateBlogRequest>,
) -> Result<Json<GenerateBlogResponse>, ApiError> {
    let topic = request.blog_topic.as_deref().map(str::trim).unwrap_or("");
    if topic.is_empty() {
        return Err(ApiError::bad_request("Blog topic is required."));
    }

    let blog = state.orchestrator.generate(topic).await.map_err(|e| {
        error!(kind = ?e.kind(), error = %e, "blog generation failed");
        ApiError::internal("Failed to generate blog content.")
    })?;

    let outcome = state.persister.persist(&blog.text, Utc::now()).await;

    Ok(Json(GenerateBlogResponse {
        message: "Blog generation is completed".to_string(),
        blog: blog.text,
        artifact_key: outcome.key().map(str::to_string),
    }))
}

/// API error type. Serializes as `{"error": <message>}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}
