use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Registration, RegistrationWithEvent, RegistrationWithUser};

#[derive(Clone)]
pub struct RegistrationStore {
    pool: PgPool,
}

impl RegistrationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn is_registered(&self, event_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM registrations WHERE event_id = $1 AND user_id = $2
             )",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Conditional insert: the `UNIQUE (event_id, user_id)` constraint decides
    /// the winner. `None` means the pair was already registered — a caller
    /// cannot tell whether the row predated the call or won a concurrent race,
    /// and must not need to.
    pub async fn register(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Registration>, sqlx::Error> {
        sqlx::query_as::<_, Registration>(
            "INSERT INTO registrations (id, event_id, user_id)
             VALUES ($1, $2, $3)
             ON CONFLICT (event_id, user_id) DO NOTHING
             RETURNING id, event_id, user_id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// A user's registrations joined with their events, most recent first.
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RegistrationWithEvent>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationWithEvent>(
            "SELECT r.id AS registration_id,
                    r.event_id,
                    e.title AS event_title,
                    e.description AS event_description,
                    e.event_date,
                    e.event_time,
                    r.created_at AS registered_at
             FROM registrations r
             JOIN events e ON e.id = r.event_id
             WHERE r.user_id = $1
             ORDER BY r.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// An event's registrations joined with the registrants, most recent first.
    pub async fn list_by_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<RegistrationWithUser>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationWithUser>(
            "SELECT r.id AS registration_id,
                    r.user_id,
                    u.name AS user_name,
                    u.email AS user_email,
                    r.created_at AS registered_at
             FROM registrations r
             JOIN users u ON u.id = r.user_id
             WHERE r.event_id = $1
             ORDER BY r.created_at DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn delete_all_for_event(&self, event_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM registrations WHERE event_id = $1")
            .bind(event_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewEvent, NewUser, Role};
    use crate::store::{EventStore, UserStore};

    async fn fixture(pool: &PgPool) -> anyhow::Result<(Uuid, Uuid)> {
        let users = UserStore::new(pool.clone());
        let events = EventStore::new(pool.clone());

        let organizer = users
            .create(NewUser {
                email: "org@example.com".to_string(),
                password_hash: "$argon2id$test".to_string(),
                name: "Org Anizer".to_string(),
                role: Role::Organizer,
            })
            .await?
            .unwrap();
        let attendee = users
            .create(NewUser {
                email: "attendee@example.com".to_string(),
                password_hash: "$argon2id$test".to_string(),
                name: "Att Endee".to_string(),
                role: Role::Attendee,
            })
            .await?
            .unwrap();
        let event = events
            .create(NewEvent {
                organizer_id: organizer.id,
                title: "Launch".to_string(),
                description: String::new(),
                date: "2025-01-01".to_string(),
                time: "10:00".to_string(),
            })
            .await?;

        Ok((event.id, attendee.id))
    }

    #[sqlx::test]
    async fn second_insert_for_same_pair_yields_none(pool: PgPool) -> anyhow::Result<()> {
        let (event_id, user_id) = fixture(&pool).await?;
        let store = RegistrationStore::new(pool);

        // No pre-check here: the constraint alone must arbitrate.
        let first = store.register(event_id, user_id).await?;
        assert!(first.is_some());

        let second = store.register(event_id, user_id).await?;
        assert!(second.is_none());

        let rows = store.list_by_event(event_id).await?;
        assert_eq!(rows.len(), 1);

        Ok(())
    }

    #[sqlx::test]
    async fn is_registered_tracks_inserts(pool: PgPool) -> anyhow::Result<()> {
        let (event_id, user_id) = fixture(&pool).await?;
        let store = RegistrationStore::new(pool);

        assert!(!store.is_registered(event_id, user_id).await?);
        store.register(event_id, user_id).await?;
        assert!(store.is_registered(event_id, user_id).await?);

        Ok(())
    }

    #[sqlx::test]
    async fn listings_join_event_and_user(pool: PgPool) -> anyhow::Result<()> {
        let (event_id, user_id) = fixture(&pool).await?;
        let store = RegistrationStore::new(pool);

        store.register(event_id, user_id).await?.unwrap();

        let by_user = store.list_by_user(user_id).await?;
        assert_eq!(by_user.len(), 1);
        assert_eq!(by_user[0].event_title, "Launch");
        assert_eq!(by_user[0].event_date, "2025-01-01");

        let by_event = store.list_by_event(event_id).await?;
        assert_eq!(by_event.len(), 1);
        assert_eq!(by_event[0].user_email, "attendee@example.com");

        Ok(())
    }

    #[sqlx::test]
    async fn delete_all_for_event_reports_count(pool: PgPool) -> anyhow::Result<()> {
        let (event_id, user_id) = fixture(&pool).await?;
        let store = RegistrationStore::new(pool);

        store.register(event_id, user_id).await?.unwrap();
        assert_eq!(store.delete_all_for_event(event_id).await?, 1);
        assert_eq!(store.delete_all_for_event(event_id).await?, 0);
        assert!(!store.is_registered(event_id, user_id).await?);

        Ok(())
    }
}
