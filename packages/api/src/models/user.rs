//! # User records
//!
//! Users are owned and persisted by the hosted backend. The client only ever
//! holds a read-only [`UserInfo`] for the lifetime of a session.
//!
//! - [`UserInfo`]: the projection returned by the backend's "current user"
//!   endpoint. The password never comes back.
//! - [`Credentials`]: email + password pair sent on login.
//! - [`SignupRequest`]: the fields sent when registering a new account; the
//!   role is fixed to [`DEFAULT_ROLE`] by this client.

use serde::{Deserialize, Serialize};

/// Role given to every account created through the signup form.
pub const DEFAULT_ROLE: &str = "customer";

/// User information as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserInfo {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Login payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Signup payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl SignupRequest {
    /// Build a signup request with the default `"customer"` role.
    pub fn customer(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: DEFAULT_ROLE.to_string(),
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}
