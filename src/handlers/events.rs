use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{CurrentUser, RequireOrganizer};
use crate::models::EventChanges;
use crate::state::AppState;
use crate::utils::response::{created, empty_success, success};
use crate::utils::AppError;

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Response, AppError> {
    let events = state.events.list_events().await?;
    Ok(success(events, "Events retrieved successfully"))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let event = state.events.get_event(event_id).await?;
    Ok(success(event, "Event retrieved successfully"))
}

pub async fn create(
    State(state): State<AppState>,
    RequireOrganizer(organizer): RequireOrganizer,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Response, AppError> {
    let event = state
        .events
        .create_event(
            organizer.id,
            payload.title.unwrap_or_default(),
            payload.description.unwrap_or_default(),
            payload.date.unwrap_or_default(),
            payload.time.unwrap_or_default(),
        )
        .await?;

    Ok(created(event, "Event created successfully"))
}

pub async fn update(
    State(state): State<AppState>,
    RequireOrganizer(organizer): RequireOrganizer,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Response, AppError> {
    let changes = EventChanges {
        title: payload.title,
        description: payload.description,
        date: payload.date,
        time: payload.time,
    };

    let event = state
        .events
        .update_event(event_id, organizer.id, changes)
        .await?;

    Ok(success(event, "Event updated successfully"))
}

pub async fn remove(
    State(state): State<AppState>,
    RequireOrganizer(organizer): RequireOrganizer,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    state.events.delete_event(event_id, organizer.id).await?;
    Ok(empty_success("Event deleted successfully"))
}

pub async fn register(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let receipt = state.events.register_for_event(event_id, user.id).await?;
    Ok(created(
        receipt,
        "Successfully registered for event. Confirmation email sent.",
    ))
}

pub async fn registrations(
    State(state): State<AppState>,
    RequireOrganizer(organizer): RequireOrganizer,
    Path(event_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let rows = state
        .events
        .event_registrations(event_id, organizer.id)
        .await?;
    Ok(success(rows, "Registrations retrieved successfully"))
}
