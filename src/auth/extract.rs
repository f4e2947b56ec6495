use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use uuid::Uuid;

use crate::models::Role;
use crate::state::AppState;
use crate::utils::AppError;

/// The authenticated caller. Extracting this verifies the bearer token and
/// confirms the account still exists; identity fields come from the store,
/// not the token, so stale claims cannot survive a role or email change.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.jwt.verify(token)?;

        let user = state
            .user_store
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::Auth("User not found".to_string()))?;

        Ok(Self {
            id: user.id,
            email: user.email,
            role: user.role,
        })
    }
}

/// Authenticated caller gate for organizer-only endpoints.
#[derive(Debug, Clone)]
pub struct RequireOrganizer(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for RequireOrganizer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;

        if user.role != Role::Organizer {
            return Err(AppError::Forbidden(
                "Access denied. Organizer role required.".to_string(),
            ));
        }

        Ok(Self(user))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(missing_token)?;

    let token = header.strip_prefix("Bearer ").ok_or_else(missing_token)?;
    if token.is_empty() {
        return Err(missing_token());
    }

    Ok(token)
}

fn missing_token() -> AppError {
    AppError::Auth("No token provided or invalid format".to_string())
}
