use serde::Serialize;

use crate::auth::{hash_password, verify_password, JwtService};
use crate::models::{NewUser, Role, UserProfile};
use crate::store::UserStore;
use crate::utils::AppError;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserStore,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(users: UserStore, jwt: JwtService) -> Self {
        Self { users, jwt }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: &str,
    ) -> Result<AuthResponse, AppError> {
        let role: Role = role.parse().map_err(|_| {
            AppError::Validation(r#"Role must be either "attendee" or "organizer""#.to_string())
        })?;

        let email = normalize_email(email);

        // Fast path; the unique index on the column settles concurrent signups.
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(duplicate_email());
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(NewUser {
                email,
                password_hash,
                name: name.to_string(),
                role,
            })
            .await?
            .ok_or_else(duplicate_email)?;

        let token = self.jwt.issue(&user)?;

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    /// Unknown email and wrong password are deliberately the same error, so
    /// login cannot be used to probe which addresses have accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let email = normalize_email(email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(invalid_credentials());
        }

        let token = self.jwt.issue(&user)?;

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn duplicate_email() -> AppError {
    AppError::Conflict("User with this email already exists".to_string())
}

fn invalid_credentials() -> AppError {
    AppError::Auth("Invalid email or password".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    fn service(pool: PgPool) -> AuthService {
        AuthService::new(
            UserStore::new(pool),
            JwtService::new("test-secret-key", 1),
        )
    }

    #[test]
    fn normalize_email_lowercases_and_trims() {
        assert_eq!(normalize_email(" Foo@Bar.com "), "foo@bar.com");
        assert_eq!(normalize_email("already@lower.case"), "already@lower.case");
    }

    #[sqlx::test]
    async fn register_then_login(pool: PgPool) -> anyhow::Result<()> {
        let auth = service(pool);

        let registered = auth
            .register("alice@example.com", "s3cret-pw", "Alice", "organizer")
            .await?;
        assert_eq!(registered.user.email, "alice@example.com");
        assert_eq!(registered.user.role, Role::Organizer);
        assert!(!registered.token.is_empty());

        let logged_in = auth.login("alice@example.com", "s3cret-pw").await?;
        assert_eq!(logged_in.user.id, registered.user.id);

        Ok(())
    }

    #[sqlx::test]
    async fn register_normalizes_email_case(pool: PgPool) -> anyhow::Result<()> {
        let auth = service(pool);

        let registered = auth
            .register("Foo@Bar.com", "s3cret-pw", "Foo", "attendee")
            .await?;
        assert_eq!(registered.user.email, "foo@bar.com");

        // Any case variant reaches the same account.
        let logged_in = auth.login("FOO@bar.COM", "s3cret-pw").await?;
        assert_eq!(logged_in.user.id, registered.user.id);

        Ok(())
    }

    #[sqlx::test]
    async fn duplicate_email_is_a_conflict(pool: PgPool) -> anyhow::Result<()> {
        let auth = service(pool);

        auth.register("bob@example.com", "pw-one", "Bob", "attendee")
            .await?;
        let err = auth
            .register("Bob@Example.com", "pw-two", "Bobby", "attendee")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        Ok(())
    }

    #[sqlx::test]
    async fn invalid_role_is_rejected(pool: PgPool) -> anyhow::Result<()> {
        let auth = service(pool);

        let err = auth
            .register("carol@example.com", "pw", "Carol", "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        Ok(())
    }

    #[sqlx::test]
    async fn login_failures_are_indistinguishable(pool: PgPool) -> anyhow::Result<()> {
        let auth = service(pool);

        auth.register("dave@example.com", "right-pw", "Dave", "attendee")
            .await?;

        let unknown = auth.login("nobody@example.com", "right-pw").await.unwrap_err();
        let wrong_pw = auth.login("dave@example.com", "wrong-pw").await.unwrap_err();

        let (AppError::Auth(a), AppError::Auth(b)) = (unknown, wrong_pw) else {
            panic!("expected auth errors");
        };
        assert_eq!(a, b);

        Ok(())
    }
}
