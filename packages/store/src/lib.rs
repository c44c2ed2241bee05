//! Client-local state for FlavorFind: the session, the restaurant cache and
//! the landing form. Nothing in here knows about the UI toolkit.

pub mod feed;
pub mod forms;
pub mod session;

pub use feed::{validate_name, FeedController, FeedEvent, RestaurantFeed};
pub use forms::{demo_submission, AuthForm, AuthMode, AuthSubmission};
pub use session::{Alert, Phase, Screen, SessionController, SessionEvent, SessionState};
