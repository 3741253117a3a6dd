// Liveness routes (no storage access)

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const LIVENESS_TEXT: &str = "Wedding RSVP API is running";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

pub fn routes() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

/// GET / - Plain-text liveness check
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Server is running", body = String, content_type = "text/plain"),
    ),
    tag = "status"
)]
pub async fn root() -> &'static str {
    LIVENESS_TEXT
}

/// GET /health - Service status and version
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service status", body = HealthResponse),
    ),
    tag = "status"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
