// Repository layer for database operations
// Decision: One SQLite table, created on open, no migrations

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

/// Schema for the RSVP table.
///
/// `created_at` is stored as RFC 3339 text with millisecond precision so that
/// lexical order matches insertion order.
const CREATE_RSVPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS rsvps (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT,
    name TEXT,
    attending TEXT,
    dietary TEXT,
    message TEXT,
    created_at DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
)
"#;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at a `sqlite:` URL and ensure
    /// the schema exists.
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        Self::connect(options).await
    }

    /// Open (creating if missing) the database file at `path` and ensure the
    /// schema exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        Self::connect(options).await
    }

    /// Private in-memory database, mainly for tests.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.initialize().await?;
        Ok(db)
    }

    async fn connect(options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let db = Self { pool };
        db.initialize().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `rsvps` table if it does not exist. Safe to call repeatedly;
    /// existing rows are left untouched.
    pub async fn initialize(&self) -> Result<()> {
        sqlx::query(CREATE_RSVPS_TABLE)
            .execute(&self.pool)
            .await
            .context("Failed to create rsvps table")?;

        tracing::debug!("rsvps table ready");
        Ok(())
    }

    // ============================================
    // RSVPs (write-once records)
    // ============================================

    pub async fn create_rsvp(&self, input: CreateRsvpRow) -> Result<RsvpRow> {
        let row = sqlx::query_as::<_, RsvpRow>(
            r#"
            INSERT INTO rsvps (code, name, attending, dietary, message)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, code, name, attending, dietary, message, created_at
            "#,
        )
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.attending)
        .bind(&input.dietary)
        .bind(&input.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// All RSVPs, newest first. `id` breaks ties between rows written within
    /// the same millisecond.
    pub async fn list_rsvps(&self) -> Result<Vec<RsvpRow>> {
        let rows = sqlx::query_as::<_, RsvpRow>(
            r#"
            SELECT id, code, name, attending, dietary, message, created_at
            FROM rsvps
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
