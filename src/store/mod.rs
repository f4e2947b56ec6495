pub mod events;
pub mod registrations;
pub mod users;

pub use events::EventStore;
pub use registrations::RegistrationStore;
pub use users::UserStore;

/// True when the error is a unique-constraint violation from the database.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
