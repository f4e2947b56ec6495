//! End-to-end registration lifecycle against a live database, driven through
//! the same service stack the HTTP layer uses.

use sqlx::PgPool;

use gather_server::config::Config;
use gather_server::models::Role;
use gather_server::state::AppState;
use gather_server::utils::AppError;

fn test_config() -> Config {
    Config {
        database_url: String::new(),
        port: 0,
        jwt_secret: "integration-test-secret".to_string(),
        token_ttl_hours: 1,
        allowed_origins: vec![],
        hsts_enabled: false,
        smtp: None,
    }
}

#[sqlx::test]
async fn full_registration_lifecycle(pool: PgPool) -> anyhow::Result<()> {
    let state = AppState::new(pool, test_config());

    // Organizer and attendee sign up; tokens come back signed.
    let organizer = state
        .auth
        .register("organizer@example.com", "org-password", "Olive", "organizer")
        .await?;
    let attendee = state
        .auth
        .register("attendee@example.com", "att-password", "Arthur", "attendee")
        .await?;

    let organizer_claims = state.jwt.verify(&organizer.token)?;
    assert_eq!(organizer_claims.role, Role::Organizer);

    // Organizer creates the event.
    let event = state
        .events
        .create_event(
            organizer.user.id,
            "Launch".to_string(),
            String::new(),
            "2025-01-01".to_string(),
            "10:00".to_string(),
        )
        .await?;

    // Attendee registers; the receipt names the event.
    let receipt = state
        .events
        .register_for_event(event.id, attendee.user.id)
        .await?;
    assert_eq!(receipt.event_title, "Launch");

    // History shows exactly one entry for the event.
    let history = state.users.registrations(attendee.user.id).await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].event_title, "Launch");
    assert_eq!(history[0].event_date, "2025-01-01");

    // A second registration attempt conflicts.
    let err = state
        .events
        .register_for_event(event.id, attendee.user.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // The organizer sees the registrant; the attendee may not peek.
    let registrants = state
        .events
        .event_registrations(event.id, organizer.user.id)
        .await?;
    assert_eq!(registrants.len(), 1);
    assert_eq!(registrants[0].user_email, "attendee@example.com");

    let err = state
        .events
        .event_registrations(event.id, attendee.user.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Organizer deletes the event; the attendee's history empties out.
    state
        .events
        .delete_event(event.id, organizer.user.id)
        .await?;

    let history = state.users.registrations(attendee.user.id).await?;
    assert!(history.is_empty());

    let err = state.events.get_event(event.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    Ok(())
}

#[sqlx::test]
async fn listing_shows_derived_participant_count(pool: PgPool) -> anyhow::Result<()> {
    let state = AppState::new(pool, test_config());

    let organizer = state
        .auth
        .register("organizer@example.com", "org-password", "Olive", "organizer")
        .await?;
    let event = state
        .events
        .create_event(
            organizer.user.id,
            "Meetup".to_string(),
            "Monthly meetup".to_string(),
            "2025-03-01".to_string(),
            "18:30".to_string(),
        )
        .await?;

    for email in ["a@example.com", "b@example.com"] {
        let user = state
            .auth
            .register(email, "password", "Guest", "attendee")
            .await?;
        state
            .events
            .register_for_event(event.id, user.user.id)
            .await?;
    }

    let listed = state.events.list_events().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].participant_count, 2);
    assert_eq!(listed[0].organizer_name, "Olive");

    Ok(())
}
