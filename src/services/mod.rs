pub mod auth;
pub mod events;
pub mod users;

pub use auth::{AuthResponse, AuthService};
pub use events::EventService;
pub use users::UserService;
