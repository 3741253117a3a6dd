// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;

// ============================================
// RSVP models
// ============================================

/// A stored RSVP. Rows are never updated or deleted once written.
#[derive(Debug, Clone, FromRow)]
pub struct RsvpRow {
    pub id: i64,
    pub code: Option<String>,
    pub name: Option<String>,
    pub attending: Option<String>,
    pub dietary: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new RSVP. `id` and `created_at` are
/// assigned by the database.
#[derive(Debug, Clone, Default)]
pub struct CreateRsvpRow {
    pub code: Option<String>,
    pub name: Option<String>,
    pub attending: Option<String>,
    pub dietary: Option<String>,
    pub message: Option<String>,
}
