use axum::extract::State;
use axum::response::Response;

use crate::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::response::success;
use crate::utils::AppError;

pub async fn profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, AppError> {
    let profile = state.users.profile(user.id).await?;
    Ok(success(profile, "Profile retrieved successfully"))
}

pub async fn registrations(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, AppError> {
    let history = state.users.registrations(user.id).await?;
    Ok(success(history, "Registrations retrieved successfully"))
}
