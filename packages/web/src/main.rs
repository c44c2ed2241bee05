use api::Settings;
use dioxus::prelude::*;

use ui::views::AppShell;
use ui::{AppContext, SessionProvider, FLAVORFIND_CSS};

fn main() {
    dioxus::launch(App);
}

/// Settings are read once; a broken config file falls back to the built-in
/// defaults so the landing page still renders.
fn load_settings() -> Settings {
    match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }
    }
}

#[component]
fn App() -> Element {
    use_context_provider(|| {
        let settings = load_settings();
        tracing::info!("Using backend at {}", settings.backend.url);
        AppContext::manifest(settings)
    });

    rsx! {
        document::Title { "FlavorFind" }
        document::Stylesheet { href: FLAVORFIND_CSS }

        SessionProvider {
            AppShell {}
        }
    }
}
