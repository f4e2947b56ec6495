pub mod event;
pub mod registration;
pub mod user;

pub use event::{Event, EventChanges, EventSummary, NewEvent};
pub use registration::{
    Registration, RegistrationReceipt, RegistrationWithEvent, RegistrationWithUser,
};
pub use user::{NewUser, Role, User, UserProfile};
