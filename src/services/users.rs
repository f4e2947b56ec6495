use uuid::Uuid;

use crate::models::{RegistrationWithEvent, UserProfile};
use crate::store::{RegistrationStore, UserStore};
use crate::utils::AppError;

#[derive(Clone)]
pub struct UserService {
    users: UserStore,
    registrations: RegistrationStore,
}

impl UserService {
    pub fn new(users: UserStore, registrations: RegistrationStore) -> Self {
        Self {
            users,
            registrations,
        }
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfile, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Registration history joined with event details, most recent first.
    pub async fn registrations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RegistrationWithEvent>, AppError> {
        Ok(self.registrations.list_by_user(user_id).await?)
    }
}
