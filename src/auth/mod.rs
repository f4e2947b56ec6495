pub mod extract;
pub mod jwt;
pub mod password;

pub use extract::{CurrentUser, RequireOrganizer};
pub use jwt::{Claims, JwtService};
pub use password::{hash_password, verify_password};
