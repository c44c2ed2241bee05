//! The capability interface the client consumes from the hosted backend.

use async_trait::async_trait;

use crate::models::{ListOptions, NewRestaurant, Paginated, Restaurant, SignupRequest, UserInfo};
use crate::Result;

/// Authentication and record operations offered by the backend-as-a-service.
///
/// One instance is built at startup and handed to every consumer; see
/// [`ManifestClient`](crate::ManifestClient) for the production implementation
/// and [`MemoryBackend`](crate::MemoryBackend) for tests.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Backend: Send + Sync {
    /// Hit the backend's health endpoint.
    async fn health(&self) -> Result<()>;

    /// Authenticate and keep the resulting session for later calls.
    async fn login(&self, email: &str, password: &str) -> Result<()>;

    /// Forget the current session. Best effort.
    async fn logout(&self);

    /// Register a new user account.
    async fn signup(&self, request: &SignupRequest) -> Result<()>;

    /// Fetch the signed-in user, or [`ApiError::NoSession`](crate::ApiError::NoSession).
    async fn current_user(&self) -> Result<UserInfo>;

    async fn list_restaurants(&self, options: &ListOptions) -> Result<Paginated<Restaurant>>;

    async fn create_restaurant(&self, restaurant: &NewRestaurant) -> Result<Restaurant>;

    /// URL of the backend's human-operated admin panel.
    fn admin_url(&self) -> String;
}
