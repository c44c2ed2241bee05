use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::Result;

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:1111";
pub const DEFAULT_APP_ID: &str = "flavorfind";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BackendSettings {
    pub url: String,
    pub app_id: String,
    pub probe_timeout_ms: u64,
}

impl BackendSettings {
    pub fn probe_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.probe_timeout_ms)
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.into(),
            app_id: DEFAULT_APP_ID.into(),
            probe_timeout_ms: 5_000,
        }
    }
}

/// Demo account offered by the "Try Demo" button.
///
/// This is an environment fixture: the account has to be created in the
/// backend (through the admin panel) before the button can succeed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DemoSettings {
    pub email: String,
    pub password: String,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            email: "demo@example.com".into(),
            password: "password123".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Settings {
    pub backend: BackendSettings,
    pub demo: DemoSettings,
}

impl Settings {
    /// Load settings from defaults, `flavorfind.toml` and `FLAVORFIND__*`
    /// environment variables, in increasing priority.
    ///
    /// The defaults for the backend URL and app id can be baked in at compile
    /// time through `FLAVORFIND_BACKEND_URL` / `FLAVORFIND_APP_ID`, which is
    /// the only source available to a browser build.
    pub fn load() -> Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let builder = {
            dotenvy::dotenv().ok();
            Self::defaults()?
                .add_source(
                    File::with_name("flavorfind.toml")
                        .format(FileFormat::Toml)
                        .required(false),
                )
                .add_source(config::Environment::with_prefix("FLAVORFIND").separator("__"))
        };
        #[cfg(target_arch = "wasm32")]
        let builder = Self::defaults()?;

        Ok(builder.build()?.try_deserialize()?)
    }

    fn defaults() -> std::result::Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Settings::default();
        Config::builder()
            .set_default(
                "backend.url",
                option_env!("FLAVORFIND_BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL),
            )?
            .set_default(
                "backend.app_id",
                option_env!("FLAVORFIND_APP_ID").unwrap_or(DEFAULT_APP_ID),
            )?
            .set_default("backend.probe_timeout_ms", defaults.backend.probe_timeout_ms)?
            .set_default("demo.email", defaults.demo.email)?
            .set_default("demo.password", defaults.demo.password)
    }

    /// Parse settings from a TOML string layered over the defaults.
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(File::from_str(s, FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiError;
    use std::env::{remove_var, set_var};

    #[test]
    fn test_settings() {
        set_var("FLAVORFIND__BACKEND__APP_ID", "test_app");
        set_var("FLAVORFIND__DEMO__EMAIL", "tester@example.com");
        let settings = Settings::load().unwrap_or_default();
        remove_var("FLAVORFIND__BACKEND__APP_ID");
        remove_var("FLAVORFIND__DEMO__EMAIL");

        assert_eq!(settings.backend.app_id, "test_app");
        assert_eq!(settings.demo.email, "tester@example.com");
        assert_eq!(settings.demo.password, "password123");
    }

    #[test]
    fn toml_overrides_defaults() {
        let settings = Settings::from_toml(
            r#"
            [backend]
            url = "https://api.flavorfind.test/"
            probe_timeout_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(settings.backend.url, "https://api.flavorfind.test/");
        assert_eq!(settings.backend.probe_timeout().as_millis(), 250);
        assert_eq!(settings.demo, DemoSettings::default());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = Settings::from_toml("[backend\nurl = ").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)), "{err:?}");

        let err = Settings::from_toml("[backend]\nprobe_timeout_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)), "{err:?}");
    }
}
