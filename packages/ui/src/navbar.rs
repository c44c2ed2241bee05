use api::UserInfo;
use dioxus::prelude::*;

use crate::context::use_app;
use crate::session::LogoutButton;

/// Dashboard header: title, greeting, admin link and logout.
#[component]
pub fn Navbar(user: UserInfo) -> Element {
    let admin_url = use_app().admin_url();
    let name = user.display_name().to_string();

    rsx! {
        header {
            class: "navbar",
            div {
                h1 { class: "navbar-title", "FlavorFind" }
                p { class: "navbar-greeting", "Welcome, {name}!" }
            }
            div {
                class: "navbar-actions",
                a {
                    class: "navbar-link",
                    href: "{admin_url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "Admin Panel"
                }
                LogoutButton { class: "btn btn-primary" }
            }
        }
    }
}
