//! # Manifest backend client
//!
//! [`ManifestClient`] talks to a Manifest backend-as-a-service over its REST
//! API. It covers only what this client consumes:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | health | `GET {base}/api/health` |
//! | login | `POST {base}/api/auth/users/login` → `{ "token": ... }` |
//! | signup | `POST {base}/api/auth/users/signup` → `{ "token": ... }` |
//! | current user | `GET {base}/api/auth/users/me` (bearer token) |
//! | list | `GET {base}/api/collections/restaurants?relations=owner` |
//! | create | `POST {base}/api/collections/restaurants` |
//!
//! The bearer token lives in memory only; logging out drops it. Every request
//! carries the configured application id in an `x-app-id` header.
//!
//! ## Status mapping
//!
//! - 2xx → success, body decoded as JSON
//! - 401 / 403 → [`ApiError::Auth`] ([`ApiError::NoSession`] for "me")
//! - 400 / 409 / 422 → [`ApiError::Validation`]
//! - anything else → [`ApiError::Network`]

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::io::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::models::{
    Credentials, ListOptions, NewRestaurant, Paginated, Restaurant, SignupRequest, UserInfo,
};
use crate::settings::BackendSettings;
use crate::{ApiError, Backend, Result};

/// Authenticable entity slug for users.
const USERS: &str = "users";
/// Collection slug for restaurants.
const RESTAURANTS: &str = "restaurants";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Client for a Manifest backend.
pub struct ManifestClient {
    base_url: String,
    app_id: String,
    http: Arc<dyn HttpClient>,
    token: RwLock<Option<String>>,
}

impl std::fmt::Debug for ManifestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestClient")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .field("authenticated", &self.has_token())
            .finish()
    }
}

impl ManifestClient {
    pub fn new(settings: &BackendSettings, http: Arc<dyn HttpClient>) -> Self {
        let base_url = settings.url.trim_end_matches('/').to_string();
        tracing::debug!("Created ManifestClient for {}", base_url);
        Self {
            base_url,
            app_id: settings.app_id.clone(),
            http,
            token: RwLock::new(None),
        }
    }

    /// Build a client backed by reqwest.
    pub fn with_reqwest(settings: &BackendSettings) -> Self {
        Self::new(settings, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .map(|t| t.is_some())
            .unwrap_or_else(|poisoned| poisoned.into_inner().is_some())
    }

    fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    fn bearer(&self) -> Option<String> {
        let guard = self
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.as_ref().map(|t| format!("Bearer {t}"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn prepare(&self, request: HttpRequest) -> HttpRequest {
        let request = request.header("x-app-id", self.app_id.clone());
        match self.bearer() {
            Some(bearer) => request.header("authorization", bearer),
            None => request,
        }
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self.http.send(self.prepare(request)).await?;
        if response.is_success() {
            return Ok(response);
        }
        let detail = error_message(&response);
        Err(match response.status {
            401 | 403 => ApiError::Auth(detail),
            400 | 409 | 422 => ApiError::Validation(detail),
            status => ApiError::Network(format!("unexpected status {status}: {detail}")),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(HttpRequest::get(self.url(path))).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_string(body)?;
        let response = self
            .execute(HttpRequest::post(self.url(path), body))
            .await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Authenticate as `entity` and keep the returned token.
    pub async fn auth_login(&self, entity: &str, credentials: &Credentials) -> Result<()> {
        let TokenResponse { token } = self
            .post_json(&format!("auth/{entity}/login"), credentials)
            .await?;
        self.set_token(Some(token));
        Ok(())
    }

    /// Register a new `entity` record. The token the backend hands back is
    /// discarded; callers log in explicitly afterwards.
    pub async fn auth_signup<B: Serialize + Sync>(&self, entity: &str, body: &B) -> Result<()> {
        let _: TokenResponse = self
            .post_json(&format!("auth/{entity}/signup"), body)
            .await?;
        Ok(())
    }

    /// Fetch the authenticated `entity` record.
    pub async fn auth_me<T: DeserializeOwned>(&self, entity: &str) -> Result<T> {
        if !self.has_token() {
            return Err(ApiError::NoSession);
        }
        self.get_json(&format!("auth/{entity}/me"))
            .await
            .map_err(|e| match e {
                ApiError::Auth(_) => ApiError::NoSession,
                other => other,
            })
    }

    /// List a collection.
    pub async fn find<T: DeserializeOwned>(
        &self,
        slug: &str,
        options: &ListOptions,
    ) -> Result<Paginated<T>> {
        let path = match options.relations_query() {
            Some(query) => format!("collections/{slug}?{query}"),
            None => format!("collections/{slug}"),
        };
        self.get_json(&path).await
    }

    /// Create a record in a collection.
    pub async fn create<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        slug: &str,
        body: &B,
    ) -> Result<T> {
        self.post_json(&format!("collections/{slug}"), body).await
    }
}

/// Pull a human-readable message out of an error body.
fn error_message(response: &HttpResponse) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: serde_json::Value,
    }

    match serde_json::from_str::<ErrorBody>(&response.body) {
        Ok(ErrorBody {
            message: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorBody {
            message: serde_json::Value::Array(items),
        }) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join("; "),
        _ if response.body.is_empty() => format!("HTTP {}", response.status),
        _ => response.body.clone(),
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Backend for ManifestClient {
    async fn health(&self) -> Result<()> {
        self.execute(HttpRequest::get(self.url("health")))
            .await
            .map(|_| ())
            .map_err(|e| match e {
                ApiError::Network(msg) => ApiError::Network(msg),
                other => ApiError::Network(other.to_string()),
            })
    }

    async fn login(&self, email: &str, password: &str) -> Result<()> {
        tracing::debug!("Logging in as {}", email);
        self.auth_login(USERS, &Credentials::new(email, password))
            .await
    }

    async fn logout(&self) {
        tracing::debug!("Dropping session token");
        self.set_token(None);
    }

    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        tracing::debug!("Signing up {}", request.email);
        self.auth_signup(USERS, request).await
    }

    async fn current_user(&self) -> Result<UserInfo> {
        self.auth_me(USERS).await
    }

    async fn list_restaurants(&self, options: &ListOptions) -> Result<Paginated<Restaurant>> {
        self.find(RESTAURANTS, options).await
    }

    async fn create_restaurant(&self, restaurant: &NewRestaurant) -> Result<Restaurant> {
        self.create(RESTAURANTS, restaurant).await
    }

    fn admin_url(&self) -> String {
        format!("{}/admin", self.base_url)
    }
}
