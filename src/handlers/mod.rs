use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;
use serde_json::json;

use crate::utils::response::{error, success};

pub mod auth;
pub mod events;
pub mod user;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "gather-api",
    };

    success(payload, "Server is running")
}

/// Root endpoint: a human-readable catalogue of the API surface.
pub async fn index() -> Response {
    let catalogue = json!({
        "name": "Gather Event Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": {
                "POST /register": "Register a new user",
                "POST /login": "Login user",
            },
            "events": {
                "GET /events": "List all events (requires authentication)",
                "GET /events/:id": "Get event by id (requires authentication)",
                "POST /events": "Create event (requires organizer role)",
                "PUT /events/:id": "Update event (own events only)",
                "DELETE /events/:id": "Delete event (own events only)",
                "POST /events/:id/register": "Register for an event",
                "GET /events/:id/registrations": "List registrants (own events only)",
            },
            "user": {
                "GET /user/profile": "Current user profile",
                "GET /user/registrations": "Current user registration history",
            },
        },
    });

    success(catalogue, "Event Management API")
}

pub async fn not_found() -> Response {
    error("NOT_FOUND", "Route not found", None, StatusCode::NOT_FOUND)
}
