//! Records exchanged with the backend.

mod id;
mod restaurant;
mod user;

pub use id::deserialize_id;
pub use restaurant::{ListOptions, NewRestaurant, Owner, Paginated, Restaurant};
pub use user::{Credentials, SignupRequest, UserInfo, DEFAULT_ROLE};
