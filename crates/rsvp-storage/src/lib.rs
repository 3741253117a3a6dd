// SQLite storage layer with sqlx
//
// This crate owns the single `rsvps` table:
// - Database: opens the store, creates the schema, inserts and lists RSVPs

pub mod models;
pub mod repositories;

pub use models::*;
pub use repositories::*;
