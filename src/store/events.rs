use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Event, EventChanges, EventSummary, NewEvent};

const SUMMARY_SELECT: &str = "SELECT e.id,
            e.organizer_id,
            u.name AS organizer_name,
            e.title,
            e.description,
            e.event_date,
            e.event_time,
            COUNT(r.id) AS participant_count,
            e.created_at,
            e.updated_at
     FROM events e
     JOIN users u ON u.id = e.organizer_id
     LEFT JOIN registrations r ON r.event_id = e.id";

#[derive(Clone)]
pub struct EventStore {
    pool: PgPool,
}

impl EventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_event: NewEvent) -> Result<Event, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, organizer_id, title, description, event_date, event_time)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, organizer_id, title, description, event_date, event_time,
                       created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(new_event.organizer_id)
        .bind(&new_event.title)
        .bind(&new_event.description)
        .bind(&new_event.date)
        .bind(&new_event.time)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            "SELECT id, organizer_id, title, description, event_date, event_time,
                    created_at, updated_at
             FROM events
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// All events with organizer name and registration count, newest first.
    pub async fn list(&self) -> Result<Vec<EventSummary>, sqlx::Error> {
        let sql = format!(
            "{SUMMARY_SELECT}
             GROUP BY e.id, u.name
             ORDER BY e.created_at DESC"
        );
        sqlx::query_as::<_, EventSummary>(&sql)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn summary_by_id(&self, id: Uuid) -> Result<Option<EventSummary>, sqlx::Error> {
        let sql = format!(
            "{SUMMARY_SELECT}
             WHERE e.id = $1
             GROUP BY e.id, u.name"
        );
        sqlx::query_as::<_, EventSummary>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Partial update; unset fields keep their stored value. `organizer_id`
    /// is deliberately not updatable.
    pub async fn update(
        &self,
        id: Uuid,
        changes: EventChanges,
    ) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            "UPDATE events
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 event_date = COALESCE($4, event_date),
                 event_time = COALESCE($5, event_time),
                 updated_at = now()
             WHERE id = $1
             RETURNING id, organizer_id, title, description, event_date, event_time,
                       created_at, updated_at",
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.date)
        .bind(changes.time)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
