use std::sync::Arc;

use uuid::Uuid;

use crate::email::{EventDetails, Notifier};
use crate::models::{
    Event, EventChanges, EventSummary, NewEvent, RegistrationReceipt, RegistrationWithUser,
};
use crate::store::{EventStore, RegistrationStore, UserStore};
use crate::utils::AppError;

/// Event lifecycle and the registration workflow. Mutations are gated on the
/// requester owning the event; registration consistency rests on the
/// storage-level uniqueness constraint.
#[derive(Clone)]
pub struct EventService {
    events: EventStore,
    registrations: RegistrationStore,
    users: UserStore,
    notifier: Arc<dyn Notifier>,
}

impl EventService {
    pub fn new(
        events: EventStore,
        registrations: RegistrationStore,
        users: UserStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            events,
            registrations,
            users,
            notifier,
        }
    }

    pub async fn list_events(&self) -> Result<Vec<EventSummary>, AppError> {
        Ok(self.events.list().await?)
    }

    pub async fn get_event(&self, event_id: Uuid) -> Result<EventSummary, AppError> {
        self.events
            .summary_by_id(event_id)
            .await?
            .ok_or_else(event_not_found)
    }

    pub async fn create_event(
        &self,
        organizer_id: Uuid,
        title: String,
        description: String,
        date: String,
        time: String,
    ) -> Result<Event, AppError> {
        if title.trim().is_empty() || date.trim().is_empty() || time.trim().is_empty() {
            return Err(AppError::Validation(
                "Title, date, and time are required".to_string(),
            ));
        }

        Ok(self
            .events
            .create(NewEvent {
                organizer_id,
                title,
                description,
                date,
                time,
            })
            .await?)
    }

    pub async fn update_event(
        &self,
        event_id: Uuid,
        requester_id: Uuid,
        changes: EventChanges,
    ) -> Result<Event, AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(event_not_found)?;

        if event.organizer_id != requester_id {
            return Err(AppError::Forbidden(
                "You can only update your own events".to_string(),
            ));
        }

        // The row can only vanish between the check and the write if someone
        // deleted it meanwhile; surface that as the same NotFound.
        self.events
            .update(event_id, changes)
            .await?
            .ok_or_else(event_not_found)
    }

    pub async fn delete_event(&self, event_id: Uuid, requester_id: Uuid) -> Result<(), AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(event_not_found)?;

        if event.organizer_id != requester_id {
            return Err(AppError::Forbidden(
                "You can only delete your own events".to_string(),
            ));
        }

        // Registrations first; the foreign key also demands this order.
        let removed = self.registrations.delete_all_for_event(event_id).await?;
        self.events.delete(event_id).await?;

        tracing::info!(event_id = %event_id, registrations_removed = removed, "event deleted");
        Ok(())
    }

    /// The consistency core. The pre-check is an optimization only: two
    /// concurrent attempts for the same (event, user) pair both reach the
    /// conditional insert and the unique constraint picks exactly one winner.
    pub async fn register_for_event(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<RegistrationReceipt, AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(event_not_found)?;

        if self.registrations.is_registered(event_id, user_id).await? {
            return Err(already_registered());
        }

        let registration = self
            .registrations
            .register(event_id, user_id)
            .await?
            .ok_or_else(already_registered)?;

        // Confirmation email is fire-and-forget: a delivery failure is logged
        // and must never fail or roll back the registration.
        if let Some(user) = self.users.find_by_id(user_id).await? {
            let notifier = Arc::clone(&self.notifier);
            let recipient = user.email;
            let details = EventDetails {
                title: event.title.clone(),
                description: event.description.clone(),
                date: event.date.clone(),
                time: event.time.clone(),
            };
            tokio::spawn(async move {
                if let Err(err) = notifier
                    .send_registration_confirmation(&recipient, &details)
                    .await
                {
                    tracing::warn!(error = %err, to = %recipient, "failed to send registration confirmation");
                }
            });
        }

        Ok(RegistrationReceipt {
            event_id: event.id,
            event_title: event.title,
            registered_at: registration.created_at,
        })
    }

    pub async fn event_registrations(
        &self,
        event_id: Uuid,
        requester_id: Uuid,
    ) -> Result<Vec<RegistrationWithUser>, AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(event_not_found)?;

        if event.organizer_id != requester_id {
            return Err(AppError::Forbidden(
                "You can only view registrations for your own events".to_string(),
            ));
        }

        Ok(self.registrations.list_by_event(event_id).await?)
    }
}

fn event_not_found() -> AppError {
    AppError::NotFound("Event not found".to_string())
}

fn already_registered() -> AppError {
    AppError::Conflict("You are already registered for this event".to_string())
}
