use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// An event row as stored. `date` and `time` are opaque strings; the service
/// attaches no calendar semantics to them.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "event_date")]
    pub date: String,
    #[sqlx(rename = "event_time")]
    pub time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing view: event joined with its organizer's name and the number of
/// active registrations. The count is derived on read, never stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventSummary {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub organizer_name: String,
    pub title: String,
    pub description: String,
    #[sqlx(rename = "event_date")]
    pub date: String,
    #[sqlx(rename = "event_time")]
    pub time: String,
    pub participant_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct NewEvent {
    pub organizer_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}
