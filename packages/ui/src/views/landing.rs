//! Sign-in / sign-up page shown to anonymous visitors.

use dioxus::prelude::*;
use store::{demo_submission, AuthForm, AuthSubmission};

use crate::context::use_app;
use crate::session::use_session_actions;

#[component]
pub fn LandingView() -> Element {
    let app = use_app();
    let actions = use_session_actions();
    let mut form = use_signal(AuthForm::new);
    let mut busy = use_signal(|| false);

    let admin_url = app.admin_url();
    let demo = app.settings.demo.clone();

    let run = use_callback(move |submission: AuthSubmission| {
        if busy() {
            return;
        }
        let actions = actions.clone();
        busy.set(true);
        spawn(async move {
            actions.submit(submission).await;
            busy.set(false);
        });
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let submission = form.read().submission();
        run.call(submission);
    };

    let current = form();
    let (prompt, link) = current.toggle_prompt();

    rsx! {
        div {
            class: "landing",
            div {
                class: "landing-card",
                h1 { class: "landing-title", "FlavorFind" }
                p { class: "landing-subtitle", "{current.subtitle()}" }

                form {
                    class: "landing-form",
                    onsubmit: on_submit,
                    if !current.is_login() {
                        label { r#for: "name", "Name" }
                        input {
                            id: "name",
                            r#type: "text",
                            required: true,
                            value: "{current.name}",
                            oninput: move |e| form.write().name = e.value(),
                        }
                    }
                    label { r#for: "email", "Email address" }
                    input {
                        id: "email",
                        r#type: "email",
                        autocomplete: "email",
                        required: true,
                        value: "{current.email}",
                        oninput: move |e| form.write().email = e.value(),
                    }
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        autocomplete: "current-password",
                        required: true,
                        value: "{current.password}",
                        oninput: move |e| form.write().password = e.value(),
                    }
                    button {
                        class: "btn btn-primary btn-block",
                        r#type: "submit",
                        disabled: busy(),
                        "{current.submit_label()}"
                    }
                }

                div {
                    class: "landing-divider",
                    span { "Or" }
                }

                div {
                    class: "landing-secondary",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: busy(),
                        onclick: move |_| run.call(demo_submission(&demo)),
                        "Try Demo"
                    }
                    a {
                        class: "btn btn-secondary",
                        href: "{admin_url}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        "Admin Panel"
                    }
                }

                p {
                    class: "landing-toggle",
                    "{prompt} "
                    button {
                        class: "link-button",
                        r#type: "button",
                        onclick: move |_| form.write().toggle(),
                        "{link}"
                    }
                }
            }
        }
    }
}
