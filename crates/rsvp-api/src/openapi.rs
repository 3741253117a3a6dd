// OpenAPI specification generation
//
// Used by the API server (for Swagger UI) and the export-openapi binary
// (for static spec generation).

use crate::api;
use crate::api::rsvps::{CreateRsvpRequest, CreateRsvpResponse, Rsvp};
use crate::api::status::HealthResponse;
use crate::api::ErrorResponse;
use utoipa::OpenApi;

/// OpenAPI documentation for the Wedding RSVP API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::status::root,
        api::status::health,
        api::rsvps::create_rsvp,
        api::rsvps::list_rsvps,
        api::export::export_json,
        api::export::export_csv,
        api::admin::admin_page,
    ),
    components(
        schemas(
            Rsvp,
            CreateRsvpRequest,
            CreateRsvpResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "status", description = "Liveness endpoints"),
        (name = "rsvps", description = "RSVP submission and listing"),
        (name = "export", description = "Downloadable JSON and CSV exports"),
        (name = "admin", description = "HTML admin view")
    ),
    info(
        title = "Wedding RSVP API",
        version = "0.1.0",
        description = "Collects wedding RSVP submissions and exposes them for review and export",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}
