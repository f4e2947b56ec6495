use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A registration joined with its event, for a user's history view.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RegistrationWithEvent {
    pub registration_id: Uuid,
    pub event_id: Uuid,
    pub event_title: String,
    pub event_description: String,
    pub event_date: String,
    pub event_time: String,
    pub registered_at: DateTime<Utc>,
}

/// A registration joined with the registrant, for an organizer's view.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RegistrationWithUser {
    pub registration_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub registered_at: DateTime<Utc>,
}

/// Returned to the caller after a successful registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationReceipt {
    pub event_id: Uuid,
    pub event_title: String,
    pub registered_at: DateTime<Utc>,
}
