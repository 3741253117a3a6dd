// Admin HTML view of all RSVPs
//
// Note: this page is not authenticated; anyone who can reach the server can
// read every submission.

use axum::{extract::State, response::Html, routing::get, Router};
use std::fmt::Write;
use std::sync::Arc;

use super::common::{ApiError, ErrorResponse};
use super::rsvps::Rsvp;
use crate::services::RsvpService;

pub const EMPTY_PLACEHOLDER: &str = "No RSVPs yet.";

const COLUMNS: [&str; 6] = ["Received", "Code", "Name", "Attending", "Dietary", "Message"];

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ddd; padding: 0.5rem; text-align: left; vertical-align: top; }
th { background: #f4f1ec; }
tr:nth-child(even) td { background: #fafafa; }
td.message { white-space: pre-wrap; }
.downloads a { margin-right: 1rem; }
"#;

/// App state for admin routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RsvpService>,
}

impl AppState {
    pub fn new(service: Arc<RsvpService>) -> Self {
        Self { service }
    }
}

/// Create admin routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/admin", get(admin_page))
        .with_state(state)
}

/// GET /admin - HTML table of all RSVPs, newest first
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Admin page", body = String, content_type = "text/html"),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn admin_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let rsvps = state.service.list().await.map_err(|e| {
        tracing::error!("Failed to list RSVPs for admin page: {:#}", e);
        ApiError::Database
    })?;

    Ok(Html(render_admin_page(&rsvps)))
}

/// Render the full admin document. Rows keep the order given.
pub fn render_admin_page(rsvps: &[Rsvp]) -> String {
    let mut html = String::with_capacity(2048 + rsvps.len() * 256);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Wedding RSVPs</title>\n");
    let _ = write!(html, "<style>{}</style>\n</head>\n<body>\n", STYLE);
    html.push_str("<h1>Wedding RSVPs</h1>\n");

    let noun = if rsvps.len() == 1 { "response" } else { "responses" };
    let _ = writeln!(html, "<p>{} {}</p>", rsvps.len(), noun);

    html.push_str("<p class=\"downloads\">");
    html.push_str("<a href=\"/export.csv\" download>Download CSV</a>");
    html.push_str("<a href=\"/export.json\" download>Download JSON</a>");
    html.push_str("</p>\n");

    html.push_str("<table>\n<thead>\n<tr>");
    for column in COLUMNS {
        let _ = write!(html, "<th>{}</th>", column);
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    if rsvps.is_empty() {
        let _ = writeln!(
            html,
            "<tr><td colspan=\"{}\">{}</td></tr>",
            COLUMNS.len(),
            EMPTY_PLACEHOLDER
        );
    }

    for rsvp in rsvps {
        let received = rsvp.created_at.format("%Y-%m-%d %H:%M UTC").to_string();
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"message\">{}</td></tr>",
            received,
            escape_html(rsvp.code.as_deref().unwrap_or_default()),
            escape_html(rsvp.name.as_deref().unwrap_or_default()),
            escape_html(rsvp.attending.as_deref().unwrap_or_default()),
            escape_html(rsvp.dietary.as_deref().unwrap_or_default()),
            escape_html(rsvp.message.as_deref().unwrap_or_default()),
        );
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

/// Escape text for use in HTML element content or quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
