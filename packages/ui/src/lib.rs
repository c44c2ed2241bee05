//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const FLAVORFIND_CSS: Asset = asset!("/assets/flavorfind.css");

mod context;
pub use context::{use_app, AppContext};

mod session;
pub use session::{use_session, use_session_actions, LogoutButton, SessionActions, SessionProvider};

mod status_indicator;
pub use status_indicator::StatusIndicator;

mod navbar;
pub use navbar::Navbar;

mod restaurant_card;
pub use restaurant_card::RestaurantCard;

mod alert_modal;
pub use alert_modal::AlertModal;
