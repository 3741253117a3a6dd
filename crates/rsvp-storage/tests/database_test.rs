//! Storage tests
//!
//! Exercise the SQLite repository against in-memory and file-backed databases.

use chrono::Utc;
use rsvp_storage::{CreateRsvpRow, Database};

fn jo() -> CreateRsvpRow {
    CreateRsvpRow {
        code: Some("A1".to_string()),
        name: Some("Jo".to_string()),
        attending: Some("yes".to_string()),
        dietary: Some("none".to_string()),
        message: Some("hi".to_string()),
    }
}

fn named(name: &str) -> CreateRsvpRow {
    CreateRsvpRow {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_empty_database_lists_nothing() {
    let db = Database::in_memory().await.unwrap();

    let rows = db.list_rsvps().await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_create_rsvp_returns_stored_row() {
    let db = Database::in_memory().await.unwrap();
    let before = Utc::now() - chrono::Duration::seconds(1);

    let row = db.create_rsvp(jo()).await.unwrap();

    assert_eq!(row.id, 1);
    assert_eq!(row.code.as_deref(), Some("A1"));
    assert_eq!(row.name.as_deref(), Some("Jo"));
    assert_eq!(row.attending.as_deref(), Some("yes"));
    assert_eq!(row.dietary.as_deref(), Some("none"));
    assert_eq!(row.message.as_deref(), Some("hi"));
    assert!(row.created_at >= before);
    assert!(row.created_at <= Utc::now() + chrono::Duration::seconds(1));
}

#[tokio::test]
async fn test_ids_are_unique_and_increasing() {
    let db = Database::in_memory().await.unwrap();

    let first = db.create_rsvp(named("one")).await.unwrap();
    let second = db.create_rsvp(named("two")).await.unwrap();
    let third = db.create_rsvp(named("three")).await.unwrap();

    assert!(first.id < second.id);
    assert!(second.id < third.id);
}

#[tokio::test]
async fn test_list_rsvps_newest_first() {
    let db = Database::in_memory().await.unwrap();

    for name in ["one", "two", "three"] {
        db.create_rsvp(named(name)).await.unwrap();
    }

    let rows = db.list_rsvps().await.unwrap();
    let names: Vec<_> = rows.iter().map(|r| r.name.as_deref().unwrap()).collect();
    assert_eq!(names, vec!["three", "two", "one"]);

    let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_missing_fields_stored_as_null() {
    let db = Database::in_memory().await.unwrap();

    let row = db.create_rsvp(CreateRsvpRow::default()).await.unwrap();
    assert!(row.code.is_none());
    assert!(row.name.is_none());

    let rows = db.list_rsvps().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].message.is_none());
}

#[tokio::test]
async fn test_text_is_stored_verbatim() {
    let db = Database::in_memory().await.unwrap();
    let message = "a,b\"c\n<script>alert('x')</script> & more";

    db.create_rsvp(CreateRsvpRow {
        message: Some(message.to_string()),
        ..Default::default()
    })
    .await
    .unwrap();

    let rows = db.list_rsvps().await.unwrap();
    assert_eq!(rows[0].message.as_deref(), Some(message));
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rsvps.db");

    let db = Database::open(&path).await.unwrap();
    let created = db.create_rsvp(jo()).await.unwrap();
    db.initialize().await.unwrap();
    db.pool().close().await;

    // Second process start against the same file
    let db = Database::open(&path).await.unwrap();
    db.initialize().await.unwrap();

    let rows = db.list_rsvps().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, created.id);
    assert_eq!(rows[0].name.as_deref(), Some("Jo"));
    assert_eq!(rows[0].created_at, created.created_at);
}

#[tokio::test]
async fn test_from_url_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.db");
    assert!(!path.exists());

    let url = format!("sqlite://{}", path.display());
    let db = Database::from_url(&url).await.unwrap();
    db.create_rsvp(named("Sam")).await.unwrap();

    assert!(path.exists());
    assert_eq!(db.list_rsvps().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_open_fails_for_unwritable_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("rsvps.db");

    assert!(Database::open(&path).await.is_err());
}
