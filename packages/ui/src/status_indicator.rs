//! Backend reachability badge.

use dioxus::prelude::*;

use crate::icons::{FaCloud, FaTriangleExclamation};
use crate::session::use_session;
use crate::Icon;

/// A small pill in the top-right corner showing the connectivity probe result.
///
/// - **Reachable**: green cloud icon ("API Connected")
/// - **Unreachable**: red warning icon ("API Offline"), with the probe error
///   as tooltip
///
/// Renders nothing until the probe has finished.
#[component]
pub fn StatusIndicator() -> Element {
    let session = use_session();
    let state = session();

    let Some(status) = state.connection else {
        return rsx! {};
    };

    if status.success {
        rsx! {
            div {
                class: "status-indicator status-indicator--online",
                title: "API Connected",
                Icon { icon: FaCloud, width: 14, height: 14 }
                span { "API Connected" }
            }
        }
    } else {
        let detail = status.error.unwrap_or_default();
        rsx! {
            div {
                class: "status-indicator status-indicator--offline",
                title: "{detail}",
                Icon { icon: FaTriangleExclamation, width: 14, height: 14 }
                span { "API Offline" }
            }
        }
    }
}
