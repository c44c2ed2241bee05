//! # Session state machine
//!
//! The session moves through four phases:
//!
//! ```text
//! Uninitialized ──RestoreStarted──▶ Restoring ──Restored──▶ Authenticated
//!                                       │                      │    ▲
//!                                    NoSession            LoggedOut │ LoggedIn
//!                                       ▼                      ▼    │
//!                                 Unauthenticated ◀────────────┘────┘
//! ```
//!
//! Work is split in two halves. [`SessionController`] talks to the backend and
//! turns each outcome into a [`SessionEvent`]; it never touches state.
//! [`SessionState::apply`] performs the transition synchronously. The UI loop
//! owns the state and applies events as calls complete, so no borrow of the
//! state is ever held across an `.await`, and results that arrive late are
//! either applied harmlessly or ignored.

use std::sync::Arc;
use std::time::Duration;

use api::{Backend, ConnectionStatus, SignupRequest, UserInfo};

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const SIGNUP_FAILED: &str = "Signup failed. The email might already be in use.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Uninitialized,
    Restoring,
    Authenticated,
    Unauthenticated,
}

/// Which top-level screen is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Landing,
    Dashboard,
}

/// A blocking message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

impl Alert {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of a session operation, ready to be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    RestoreStarted,
    Connectivity(ConnectionStatus),
    Restored(UserInfo),
    NoSession,
    LoggedIn(UserInfo),
    LoginFailed,
    SignupFailed,
    LogoutStarted,
    LoggedOut,
    AlertDismissed,
}

/// Client-local session: at most one user plus the screen selection.
///
/// Invariant: `screen == Screen::Dashboard` implies `user.is_some()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub phase: Phase,
    pub user: Option<UserInfo>,
    pub screen: Screen,
    /// `None` until the connectivity probe has finished.
    pub connection: Option<ConnectionStatus>,
    pub alert: Option<Alert>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Still working out whether someone is signed in.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Uninitialized | Phase::Restoring)
    }

    pub fn is_online(&self) -> bool {
        self.connection.as_ref().is_some_and(|c| c.success)
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == Phase::Authenticated && self.user.is_some()
    }

    /// Apply an event. Returns `false` when the event was ignored.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::RestoreStarted => {
                if self.phase != Phase::Uninitialized {
                    return false;
                }
                self.phase = Phase::Restoring;
            }
            SessionEvent::Connectivity(status) => {
                self.connection = Some(status);
            }
            SessionEvent::Restored(user) => {
                if self.phase != Phase::Restoring {
                    tracing::debug!("Ignoring late session restore");
                    return false;
                }
                tracing::info!("Restored session for {}", user.email);
                self.sign_in(user);
            }
            SessionEvent::NoSession => {
                if self.phase != Phase::Restoring {
                    return false;
                }
                self.sign_out();
            }
            SessionEvent::LoggedIn(user) => {
                tracing::info!("Logged in as {}", user.email);
                self.sign_in(user);
                self.alert = None;
            }
            SessionEvent::LoginFailed => {
                self.sign_out();
                self.alert = Some(Alert::new(LOGIN_FAILED));
            }
            SessionEvent::SignupFailed => {
                self.sign_out();
                self.alert = Some(Alert::new(SIGNUP_FAILED));
            }
            SessionEvent::LogoutStarted => {
                self.screen = Screen::Landing;
            }
            SessionEvent::LoggedOut => {
                tracing::info!("Logged out");
                self.sign_out();
            }
            SessionEvent::AlertDismissed => {
                self.alert = None;
            }
        }
        true
    }

    fn sign_in(&mut self, user: UserInfo) {
        self.user = Some(user);
        self.phase = Phase::Authenticated;
        self.screen = Screen::Dashboard;
    }

    fn sign_out(&mut self) {
        self.user = None;
        self.phase = Phase::Unauthenticated;
        self.screen = Screen::Landing;
    }
}

/// Runs session operations against a backend and reports their outcome.
pub struct SessionController<B: Backend + ?Sized> {
    backend: Arc<B>,
    probe_timeout: Duration,
}

impl<B: Backend + ?Sized> Clone for SessionController<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            probe_timeout: self.probe_timeout,
        }
    }
}

impl<B: Backend + ?Sized> SessionController<B> {
    pub fn new(backend: Arc<B>, probe_timeout: Duration) -> Self {
        Self {
            backend,
            probe_timeout,
        }
    }

    /// Probe the backend once.
    pub async fn probe(&self) -> SessionEvent {
        SessionEvent::Connectivity(api::test_connection(&*self.backend, self.probe_timeout).await)
    }

    /// Ask the backend who is signed in. Never produces an alert.
    pub async fn restore(&self) -> SessionEvent {
        match self.backend.current_user().await {
            Ok(user) => SessionEvent::Restored(user),
            Err(e) if e.is_no_session() => {
                tracing::info!("No active user session");
                SessionEvent::NoSession
            }
            Err(e) => {
                tracing::warn!("Session restore failed: {}", e);
                SessionEvent::NoSession
            }
        }
    }

    /// Probe, then restore when the backend is reachable.
    ///
    /// Each event is handed to `apply` as soon as it is known, so the state
    /// is `Restoring` for the whole probe and current-user round trip.
    pub async fn startup(&self, mut apply: impl FnMut(SessionEvent)) {
        apply(SessionEvent::RestoreStarted);
        tracing::info!("Starting backend connection test");
        let probe = self.probe().await;
        let online = matches!(&probe, SessionEvent::Connectivity(s) if s.success);
        apply(probe);
        let session = if online {
            self.restore().await
        } else {
            SessionEvent::NoSession
        };
        apply(session);
    }

    /// Log in, then fetch the signed-in user.
    pub async fn login(&self, email: &str, password: &str) -> SessionEvent {
        match self.authenticate(email, password).await {
            Ok(user) => SessionEvent::LoggedIn(user),
            Err(e) => {
                tracing::error!("Login failed: {}", e);
                SessionEvent::LoginFailed
            }
        }
    }

    async fn authenticate(&self, email: &str, password: &str) -> api::Result<UserInfo> {
        self.backend.login(email, password).await?;
        self.backend.current_user().await
    }

    /// Sign up with the default role, then log in with the same credentials.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> SessionEvent {
        let request = SignupRequest::customer(name, email, password);
        if let Err(e) = self.backend.signup(&request).await {
            tracing::error!("Signup failed: {}", e);
            return SessionEvent::SignupFailed;
        }
        self.login(email, password).await
    }

    /// Log out. Always ends signed out, whatever the backend says.
    pub async fn logout(&self) -> SessionEvent {
        self.backend.logout().await;
        SessionEvent::LoggedOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::MemoryBackend;
    use std::cell::RefCell;

    fn controller(backend: &MemoryBackend) -> SessionController<MemoryBackend> {
        SessionController::new(Arc::new(backend.clone()), Duration::from_secs(1))
    }

    async fn start(ctl: &SessionController<MemoryBackend>) -> SessionState {
        let mut state = SessionState::new();
        ctl.startup(|event| {
            state.apply(event);
        })
        .await;
        state
    }

    fn assert_invariant(state: &SessionState) {
        if state.screen == Screen::Dashboard {
            assert!(state.user.is_some(), "dashboard without a user: {state:?}");
        }
    }

    #[tokio::test]
    async fn restore_without_session_lands_silently() {
        let backend = MemoryBackend::new();
        let state = start(&controller(&backend)).await;

        assert_eq!(state.phase, Phase::Unauthenticated);
        assert_eq!(state.screen, Screen::Landing);
        assert!(state.alert.is_none());
        assert!(state.is_online());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn current_user_lookup_runs_while_restoring() {
        let backend = MemoryBackend::new();
        backend.delay("current_user", Duration::from_millis(100));
        let ctl = controller(&backend);
        let state = RefCell::new(SessionState::new());

        let observe = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let seen = state.borrow();
            (seen.phase, seen.is_online(), seen.is_loading())
        };
        let (_, during) = tokio::join!(
            ctl.startup(|event| {
                state.borrow_mut().apply(event);
            }),
            observe
        );

        assert_eq!(during, (Phase::Restoring, true, true));
        assert_eq!(backend.calls(), vec!["health", "current_user"]);
        assert_eq!(state.borrow().phase, Phase::Unauthenticated);
    }

    #[tokio::test]
    async fn restore_finishing_after_login_is_ignored() {
        let backend = MemoryBackend::new();
        backend.delay("current_user", Duration::from_millis(100));
        let ctl = controller(&backend);
        let state = RefCell::new(SessionState::new());
        let ana = UserInfo {
            id: "1".into(),
            email: "ana@example.com".into(),
            name: Some("Ana".into()),
            role: None,
        };

        let login = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            state
                .borrow_mut()
                .apply(SessionEvent::LoggedIn(ana.clone()));
        };
        tokio::join!(
            ctl.startup(|event| {
                state.borrow_mut().apply(event);
            }),
            login
        );

        let state = state.into_inner();
        assert_eq!(state.phase, Phase::Authenticated);
        assert_eq!(state.screen, Screen::Dashboard);
        assert_eq!(state.user, Some(ana));
    }

    #[tokio::test]
    async fn restore_with_session_shows_dashboard_for_that_user() {
        let backend = MemoryBackend::new();
        let ana = backend.with_account("Ana", "ana@example.com", "pw");
        backend.login("ana@example.com", "pw").await.unwrap();

        let state = start(&controller(&backend)).await;

        assert_eq!(state.phase, Phase::Authenticated);
        assert_eq!(state.screen, Screen::Dashboard);
        assert_eq!(state.user, Some(ana));
    }

    #[tokio::test]
    async fn offline_startup_skips_restore_and_accepts_login_attempts() {
        let backend = MemoryBackend::new();
        backend.with_account("Ana", "ana@example.com", "pw");
        backend.set_offline(true);
        let ctl = controller(&backend);

        let mut state = start(&ctl).await;
        assert!(!state.is_online());
        assert_eq!(state.screen, Screen::Landing);
        assert!(state.alert.is_none());
        assert_eq!(backend.calls(), vec!["health"]);

        backend.set_offline(false);
        state.apply(ctl.login("ana@example.com", "pw").await);
        assert_eq!(state.screen, Screen::Dashboard);
    }

    #[tokio::test]
    async fn login_then_logout_ends_on_landing_without_user() {
        let backend = MemoryBackend::new();
        backend.with_account("Ana", "ana@example.com", "pw");
        let ctl = controller(&backend);
        let mut state = start(&ctl).await;

        for _ in 0..3 {
            state.apply(ctl.login("ana@example.com", "pw").await);
            assert_invariant(&state);
            assert!(state.is_authenticated());

            state.apply(SessionEvent::LogoutStarted);
            assert_eq!(state.screen, Screen::Landing);
            assert_invariant(&state);

            state.apply(ctl.logout().await);
            assert_eq!(state.user, None);
            assert_eq!(state.screen, Screen::Landing);
            assert_eq!(state.phase, Phase::Unauthenticated);
        }
    }

    #[tokio::test]
    async fn bad_credentials_raise_login_alert() {
        let backend = MemoryBackend::new();
        backend.with_account("Ana", "ana@example.com", "pw");
        let ctl = controller(&backend);
        let mut state = start(&ctl).await;

        state.apply(ctl.login("ana@example.com", "nope").await);
        assert_eq!(state.phase, Phase::Unauthenticated);
        assert_eq!(state.alert, Some(Alert::new(LOGIN_FAILED)));

        state.apply(SessionEvent::AlertDismissed);
        assert!(state.alert.is_none());
    }

    #[tokio::test]
    async fn signup_logs_in_with_same_credentials() {
        let backend = MemoryBackend::new();
        let ctl = controller(&backend);
        let mut state = start(&ctl).await;

        state.apply(ctl.signup("Ana", "ana@example.com", "pw").await);

        assert!(state.is_authenticated());
        let user = state.user.as_ref().unwrap();
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.role.as_deref(), Some("customer"));
        assert_eq!(
            backend.calls(),
            vec!["health", "current_user", "signup", "login", "current_user"]
        );
    }

    #[tokio::test]
    async fn signup_with_failing_login_ends_unauthenticated() {
        let backend = MemoryBackend::new();
        backend.fail_logins(true);
        let ctl = controller(&backend);
        let mut state = start(&ctl).await;

        let event = ctl.signup("Ana", "ana@example.com", "pw").await;
        assert_eq!(event, SessionEvent::LoginFailed);
        state.apply(event);

        assert_eq!(state.phase, Phase::Unauthenticated);
        assert_eq!(state.screen, Screen::Landing);
        assert!(state.user.is_none());
        assert!(backend.calls().contains(&"login"));
    }

    #[tokio::test]
    async fn duplicate_signup_raises_signup_alert() {
        let backend = MemoryBackend::new();
        backend.with_account("Ana", "ana@example.com", "pw");
        let ctl = controller(&backend);
        let mut state = start(&ctl).await;

        state.apply(ctl.signup("Ana", "ana@example.com", "pw").await);

        assert_eq!(state.alert, Some(Alert::new(SIGNUP_FAILED)));
        assert_eq!(state.phase, Phase::Unauthenticated);
        assert!(!backend.calls().contains(&"login"));
    }

    #[test]
    fn late_restore_after_login_is_ignored() {
        let ana = UserInfo {
            id: "1".into(),
            email: "ana@example.com".into(),
            name: None,
            role: None,
        };
        let mut state = SessionState::new();
        state.apply(SessionEvent::RestoreStarted);
        state.apply(SessionEvent::NoSession);
        state.apply(SessionEvent::LoggedIn(ana.clone()));
        state.apply(SessionEvent::LogoutStarted);
        state.apply(SessionEvent::LoggedOut);

        assert!(!state.apply(SessionEvent::Restored(ana)));
        assert!(!state.apply(SessionEvent::NoSession));
        assert!(!state.apply(SessionEvent::RestoreStarted));
        assert_eq!(state.screen, Screen::Landing);
        assert!(state.user.is_none());
    }

    #[test]
    fn starts_loading_on_landing() {
        let state = SessionState::new();
        assert!(state.is_loading());
        assert_eq!(state.screen, Screen::Landing);
        assert!(state.connection.is_none());
    }
}
