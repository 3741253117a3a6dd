// RSVP service for business logic

use anyhow::Result;
use rsvp_storage::{CreateRsvpRow, Database, RsvpRow};
use std::sync::Arc;
use tracing::Instrument;

use crate::api::rsvps::{CreateRsvpRequest, Rsvp};

pub struct RsvpService {
    db: Arc<Database>,
}

impl RsvpService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: CreateRsvpRequest) -> Result<Rsvp> {
        let span = tracing::info_span!(
            "rsvp.create",
            "rsvp.code" = req.code.as_deref().unwrap_or(""),
            "rsvp.id" = tracing::field::Empty,
        );

        self.create_inner(req).instrument(span).await
    }

    async fn create_inner(&self, req: CreateRsvpRequest) -> Result<Rsvp> {
        let input = CreateRsvpRow {
            code: req.code,
            name: req.name,
            attending: req.attending,
            dietary: req.dietary,
            message: req.message,
        };
        let row = self.db.create_rsvp(input).await?;

        tracing::Span::current().record("rsvp.id", row.id);
        tracing::info!(id = row.id, "RSVP recorded");

        Ok(Self::row_to_rsvp(row))
    }

    /// All RSVPs, newest first.
    pub async fn list(&self) -> Result<Vec<Rsvp>> {
        let rows = self.db.list_rsvps().await?;
        Ok(rows.into_iter().map(Self::row_to_rsvp).collect())
    }

    fn row_to_rsvp(row: RsvpRow) -> Rsvp {
        Rsvp {
            id: row.id,
            code: row.code,
            name: row.name,
            attending: row.attending,
            dietary: row.dietary,
            message: row.message,
            created_at: row.created_at,
        }
    }
}
