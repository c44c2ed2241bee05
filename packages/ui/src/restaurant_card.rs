use api::Restaurant;
use dioxus::prelude::*;

#[component]
pub fn RestaurantCard(restaurant: Restaurant, mine: bool) -> Element {
    let owner_name = restaurant
        .owner
        .as_ref()
        .map(|o| o.name.clone().unwrap_or_else(|| format!("#{}", o.id)));
    let description = restaurant.description_or_default().to_string();

    rsx! {
        div {
            class: "restaurant-card",
            h3 { class: "restaurant-card-name", "{restaurant.name}" }
            if let Some(owner) = owner_name {
                p { class: "restaurant-card-owner", "Owner: {owner}" }
            }
            p { class: "restaurant-card-description", "{description}" }
            if mine {
                span { class: "restaurant-card-badge", "Your Restaurant" }
            }
        }
    }
}
