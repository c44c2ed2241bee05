//! The backend client and settings shared by every component.

use std::sync::Arc;

use api::{Backend, ManifestClient, Settings};
use dioxus::prelude::*;
use store::{FeedController, SessionController};

/// Built once at startup and provided through context. Components reach the
/// backend only through this value.
#[derive(Clone)]
pub struct AppContext {
    pub backend: Arc<dyn Backend>,
    pub settings: Settings,
}

impl AppContext {
    pub fn new(backend: Arc<dyn Backend>, settings: Settings) -> Self {
        Self { backend, settings }
    }

    /// Context backed by the Manifest client described in `settings`.
    pub fn manifest(settings: Settings) -> Self {
        let backend: Arc<dyn Backend> = Arc::new(ManifestClient::with_reqwest(&settings.backend));
        Self::new(backend, settings)
    }

    pub fn session_controller(&self) -> SessionController<dyn Backend> {
        SessionController::new(
            Arc::clone(&self.backend),
            self.settings.backend.probe_timeout(),
        )
    }

    pub fn feed_controller(&self) -> FeedController<dyn Backend> {
        FeedController::new(Arc::clone(&self.backend))
    }

    pub fn admin_url(&self) -> String {
        self.backend.admin_url()
    }
}

/// Get the application context provided at the root.
pub fn use_app() -> AppContext {
    use_context::<AppContext>()
}
