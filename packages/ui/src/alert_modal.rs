use dioxus::prelude::*;

use crate::views::ModalOverlay;

/// Blocking message with a single "OK" button.
#[component]
pub fn AlertModal(message: String, on_close: EventHandler<()>) -> Element {
    rsx! {
        ModalOverlay {
            on_close: on_close,
            div {
                class: "modal-body",
                role: "alertdialog",
                p { class: "modal-message", "{message}" }
                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| on_close.call(()),
                        "OK"
                    }
                }
            }
        }
    }
}
