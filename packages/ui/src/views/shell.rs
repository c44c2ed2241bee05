use dioxus::prelude::*;
use store::Screen;

use crate::alert_modal::AlertModal;
use crate::session::{use_session, use_session_actions};
use crate::status_indicator::StatusIndicator;
use crate::views::{DashboardView, LandingView};

/// Top-level screen switch: startup splash, landing or dashboard.
#[component]
pub fn AppShell() -> Element {
    let session = use_session();
    let actions = use_session_actions();
    let state = session();

    if state.is_loading() {
        return rsx! {
            div { class: "splash", "Loading Application..." }
        };
    }

    let dashboard_user = match state.screen {
        Screen::Dashboard => state.user.clone(),
        Screen::Landing => None,
    };

    rsx! {
        StatusIndicator {}

        if let Some(user) = dashboard_user {
            DashboardView { user }
        } else {
            LandingView {}
        }

        if let Some(alert) = state.alert.clone() {
            AlertModal {
                message: alert.message,
                on_close: move |_| actions.dismiss_alert(),
            }
        }
    }
}
