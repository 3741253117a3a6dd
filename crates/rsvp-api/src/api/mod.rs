// HTTP API routes
//
// Each submodule handles one view of the RSVP table with its own AppState.
// Storage is injected by the caller so tests can use an in-memory database.

pub mod admin;
pub mod common;
pub mod export;
pub mod rsvps;
pub mod status;

use axum::Router;
use rsvp_storage::Database;
use std::sync::Arc;

use crate::services::RsvpService;

// Re-export common types
pub use common::{ApiError, ErrorResponse};

/// Build the application router over an already-initialized database.
pub fn router(db: Arc<Database>) -> Router {
    let service = Arc::new(RsvpService::new(db));

    Router::new()
        .merge(status::routes())
        .merge(rsvps::routes(rsvps::AppState::new(service.clone())))
        .merge(export::routes(export::AppState::new(service.clone())))
        .merge(admin::routes(admin::AppState::new(service)))
}
