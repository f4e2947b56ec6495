use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::state::AppState;
use crate::utils::response::{created, success};
use crate::utils::AppError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    let (Some(email), Some(password), Some(name)) =
        (payload.email, payload.password, payload.name)
    else {
        return Err(missing_register_fields());
    };
    if email.trim().is_empty() || password.is_empty() || name.trim().is_empty() {
        return Err(missing_register_fields());
    }

    let role = payload.role.as_deref().unwrap_or("attendee");
    let result = state.auth.register(&email, &password, &name, role).await?;

    Ok(created(result, "User registered successfully"))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(missing_login_fields());
    };
    if email.trim().is_empty() || password.is_empty() {
        return Err(missing_login_fields());
    }

    let result = state.auth.login(&email, &password).await?;

    Ok(success(result, "Login successful"))
}

fn missing_register_fields() -> AppError {
    AppError::Validation("Email, password, and name are required".to_string())
}

fn missing_login_fields() -> AppError {
    AppError::Validation("Email and password are required".to_string())
}
