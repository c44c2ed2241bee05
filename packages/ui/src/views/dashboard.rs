//! Restaurant list and create form for a signed-in user.

use api::UserInfo;
use dioxus::prelude::*;
use store::{FeedEvent, RestaurantFeed};

use crate::alert_modal::AlertModal;
use crate::context::use_app;
use crate::navbar::Navbar;
use crate::restaurant_card::RestaurantCard;

#[component]
pub fn DashboardView(user: UserInfo) -> Element {
    let app = use_app();
    let mut feed = use_signal(RestaurantFeed::new);
    let controller = app.feed_controller();

    // Tasks below belong to this component and are dropped with it, so a
    // result arriving after logout never touches a live list.
    let loader = controller.clone();
    let _ = use_resource(move || {
        let loader = loader.clone();
        async move {
            feed.write().apply(FeedEvent::LoadStarted);
            let event = loader.load().await;
            feed.write().apply(event);
        }
    });

    let on_create = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = feed.read().draft.clone();
        let controller = controller.clone();
        spawn(async move {
            let event = controller.create(&draft).await;
            feed.write().apply(event);
        });
    };

    let state = feed();

    rsx! {
        div {
            class: "dashboard",
            Navbar { user: user.clone() }

            main {
                class: "dashboard-main",
                section {
                    class: "panel",
                    h2 { class: "panel-title", "Add a New Restaurant" }
                    form {
                        class: "create-form",
                        onsubmit: on_create,
                        input {
                            r#type: "text",
                            placeholder: "Restaurant Name",
                            value: "{state.draft}",
                            oninput: move |e| feed.write().apply(FeedEvent::DraftChanged(e.value())),
                        }
                        button { class: "btn btn-primary", r#type: "submit", "Add Restaurant" }
                    }
                }

                section {
                    class: "panel",
                    h2 { class: "panel-title", "All Restaurants" }
                    if let Some(error) = state.load_error.clone() {
                        div { class: "banner banner-error", "{error}" }
                    }
                    if state.loading {
                        p { class: "muted", "Loading restaurants..." }
                    } else if state.is_empty() {
                        p { class: "muted", "No restaurants found. Add one to get started!" }
                    } else {
                        div {
                            class: "restaurant-grid",
                            for restaurant in state.items.iter() {
                                RestaurantCard {
                                    key: "{restaurant.id}",
                                    restaurant: restaurant.clone(),
                                    mine: RestaurantFeed::is_mine(restaurant, Some(&user)),
                                }
                            }
                        }
                    }
                }
            }

            if let Some(alert) = state.alert.clone() {
                AlertModal {
                    message: alert.message,
                    on_close: move |_| feed.write().apply(FeedEvent::AlertDismissed),
                }
            }
        }
    }
}
