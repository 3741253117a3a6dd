// RSVP submission and listing HTTP routes

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;

use super::common::{ApiError, ErrorResponse};
use crate::services::RsvpService;

/// A stored RSVP as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rsvp {
    /// Assigned by the server, increasing with each submission.
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "A1")]
    pub code: Option<String>,
    #[schema(example = "Jo")]
    pub name: Option<String>,
    #[schema(example = "yes")]
    pub attending: Option<String>,
    #[schema(example = "none")]
    pub dietary: Option<String>,
    #[schema(example = "hi")]
    pub message: Option<String>,
    /// When the submission was stored (UTC).
    pub created_at: DateTime<Utc>,
}

/// RSVP form submission.
///
/// Every field is optional. Missing or null fields are stored as null, and
/// numbers or booleans are stored as their text form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateRsvpRequest {
    /// Invitation code from the card. Not checked against any guest list.
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "A1")]
    pub code: Option<String>,
    /// Guest or party name.
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "Jo")]
    pub name: Option<String>,
    /// Free-form attendance answer.
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "yes")]
    pub attending: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "none")]
    pub dietary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    #[schema(example = "hi")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRsvpResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = 1)]
    pub id: i64,
}

/// Accept any JSON value for a text field: strings as-is, null as missing,
/// everything else as its JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// App state for RSVP routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RsvpService>,
}

impl AppState {
    pub fn new(service: Arc<RsvpService>) -> Self {
        Self { service }
    }
}

/// Create RSVP routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/rsvp", post(create_rsvp))
        .route("/rsvps", get(list_rsvps))
        .with_state(state)
}

/// POST /rsvp - Record a submission
#[utoipa::path(
    post,
    path = "/rsvp",
    request_body = CreateRsvpRequest,
    responses(
        (status = 200, description = "RSVP stored", body = CreateRsvpResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "rsvps"
)]
pub async fn create_rsvp(
    State(state): State<AppState>,
    Json(req): Json<CreateRsvpRequest>,
) -> Result<Json<CreateRsvpResponse>, ApiError> {
    let rsvp = state.service.create(req).await.map_err(|e| {
        tracing::error!("Failed to create RSVP: {:#}", e);
        ApiError::Database
    })?;

    Ok(Json(CreateRsvpResponse {
        success: true,
        id: rsvp.id,
    }))
}

/// GET /rsvps - List all RSVPs, newest first
#[utoipa::path(
    get,
    path = "/rsvps",
    responses(
        (status = 200, description = "All RSVPs, newest first", body = Vec<Rsvp>),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "rsvps"
)]
pub async fn list_rsvps(State(state): State<AppState>) -> Result<Json<Vec<Rsvp>>, ApiError> {
    let rsvps = state.service.list().await.map_err(|e| {
        tracing::error!("Failed to list RSVPs: {:#}", e);
        ApiError::Database
    })?;

    Ok(Json(rsvps))
}
