use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{cors_layer, SecurityHeadersLayer};
use crate::handlers::{self, auth, events, user};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let security = SecurityHeadersLayer::new(state.config.hsts_enabled);
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/events", get(events::list).post(events::create))
        .route(
            "/events/:id",
            get(events::get_by_id)
                .put(events::update)
                .delete(events::remove),
        )
        .route("/events/:id/register", post(events::register))
        .route("/events/:id/registrations", get(events::registrations))
        .route("/user/profile", get(user::profile))
        .route("/user/registrations", get(user::registrations))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(security)
        .layer(cors)
        .with_state(state)
}
