//! Error types for calls against the hosted backend.

/// Failures surfaced by a [`Backend`](crate::Backend) implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The backend could not be reached, timed out or answered with an
    /// unexpected status.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend rejected the supplied credentials or token.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The backend (or a client-side check) rejected the submitted fields.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No user is signed in. Expected during session restoration.
    #[error("No active session")]
    NoSession,

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether this is the expected "nobody is signed in" outcome rather
    /// than a real failure.
    pub fn is_no_session(&self) -> bool {
        matches!(self, ApiError::NoSession)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(e: config::ConfigError) -> Self {
        ApiError::Config(e.to_string())
    }
}

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, ApiError>;
