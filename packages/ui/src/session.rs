//! Session context and hooks for the UI.

use api::Backend;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use store::{AuthSubmission, SessionController, SessionEvent, SessionState};

use crate::context::use_app;

/// Get the current session state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Provider component that owns the session state.
/// Wrap your app with this component; it probes the backend and restores
/// any existing session on mount.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let app = use_app();
    let mut session = use_signal(SessionState::new);

    let _ = use_resource(move || {
        let controller = app.session_controller();
        async move {
            controller
                .startup(|event| {
                    session.write().apply(event);
                })
                .await;
            tracing::debug!("Session startup finished: {:?}", session.peek().phase);
        }
    });

    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Session operations bound to the provider's state.
#[derive(Clone)]
pub struct SessionActions {
    state: Signal<SessionState>,
    controller: SessionController<dyn Backend>,
}

impl SessionActions {
    /// Run a login or signup and apply the outcome.
    pub async fn submit(self, submission: AuthSubmission) {
        let event = match submission {
            AuthSubmission::Login(credentials) => {
                self.controller
                    .login(&credentials.email, &credentials.password)
                    .await
            }
            AuthSubmission::Signup {
                name,
                email,
                password,
            } => self.controller.signup(&name, &email, &password).await,
        };
        let mut state = self.state;
        state.write().apply(event);
    }

    /// Leave the dashboard immediately, then log out in the background.
    ///
    /// The task is spawned at the root so it survives the dashboard unmounting.
    pub fn logout(&self) {
        let mut state = self.state;
        state.write().apply(SessionEvent::LogoutStarted);
        let controller = self.controller.clone();
        spawn_forever(async move {
            let event = controller.logout().await;
            state.write().apply(event);
        });
    }

    pub fn dismiss_alert(&self) {
        let mut state = self.state;
        state.write().apply(SessionEvent::AlertDismissed);
    }
}

pub fn use_session_actions() -> SessionActions {
    let app = use_app();
    SessionActions {
        state: use_session(),
        controller: app.session_controller(),
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let actions = use_session_actions();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| actions.logout(),
            "{label}"
        }
    }
}
