// Export HTTP routes (downloadable JSON and CSV snapshots)

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{NaiveDate, SecondsFormat, Utc};
use std::borrow::Cow;
use std::sync::Arc;

use super::common::{ApiError, ErrorResponse};
use super::rsvps::Rsvp;
use crate::services::RsvpService;

/// Column order of the CSV export.
pub const CSV_HEADER: &str = "id,created_at,code,name,attending,dietary,message";

/// App state for export routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RsvpService>,
}

impl AppState {
    pub fn new(service: Arc<RsvpService>) -> Self {
        Self { service }
    }
}

/// Create export routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/export.json", get(export_json))
        .route("/export.csv", get(export_csv))
        .with_state(state)
}

/// GET /export.json - Download all RSVPs as pretty-printed JSON
#[utoipa::path(
    get,
    path = "/export.json",
    responses(
        (status = 200, description = "JSON attachment of all RSVPs", body = Vec<Rsvp>),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "export"
)]
pub async fn export_json(State(state): State<AppState>) -> Result<Response, ApiError> {
    let rsvps = state.service.list().await.map_err(|e| {
        tracing::error!("Failed to list RSVPs for JSON export: {:#}", e);
        ApiError::Database
    })?;

    let body = serde_json::to_string_pretty(&rsvps).map_err(|e| {
        tracing::error!("Failed to serialize RSVP export: {}", e);
        ApiError::Internal
    })?;

    Ok(attachment("application/json", "json", body))
}

/// GET /export.csv - Download all RSVPs as CSV
#[utoipa::path(
    get,
    path = "/export.csv",
    responses(
        (status = 200, description = "CSV attachment of all RSVPs", body = String, content_type = "text/csv"),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "export"
)]
pub async fn export_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let rsvps = state.service.list().await.map_err(|e| {
        tracing::error!("Failed to list RSVPs for CSV export: {:#}", e);
        ApiError::Database
    })?;

    Ok(attachment("text/csv; charset=utf-8", "csv", rsvps_to_csv(&rsvps)))
}

fn attachment(content_type: &str, extension: &str, body: String) -> Response {
    let filename = export_filename(extension, Utc::now().date_naive());

    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

/// `wedding-rsvps-YYYY-MM-DD.<extension>`
pub fn export_filename(extension: &str, date: NaiveDate) -> String {
    format!("wedding-rsvps-{}.{}", date.format("%Y-%m-%d"), extension)
}

/// Render RSVPs as CSV: a header line then one line per record, in the
/// order given. Missing fields are written as empty cells.
pub fn rsvps_to_csv(rsvps: &[Rsvp]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + rsvps.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for rsvp in rsvps {
        let id = rsvp.id.to_string();
        let created_at = rsvp.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        let cells = [
            id.as_str(),
            created_at.as_str(),
            rsvp.code.as_deref().unwrap_or_default(),
            rsvp.name.as_deref().unwrap_or_default(),
            rsvp.attending.as_deref().unwrap_or_default(),
            rsvp.dietary.as_deref().unwrap_or_default(),
            rsvp.message.as_deref().unwrap_or_default(),
        ];

        let line = cells.map(csv_cell).join(",");
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Quote a cell if it contains a comma, quote or line break, doubling any
/// embedded quotes.
pub fn csv_cell(value: &str) -> Cow<'_, str> {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
