//! Client cache of the restaurant list.
//!
//! The cache is updated two ways: a full replace when a list fetch succeeds,
//! and a local prepend when a create succeeds. There is no re-fetch after a
//! create, so the cache is only eventually consistent with the backend.

use std::sync::Arc;

use api::{ApiError, Backend, ListOptions, NewRestaurant, Restaurant, UserInfo};

use crate::session::Alert;

pub const CREATE_FAILED: &str = "Could not create restaurant.";
pub const LOAD_FAILED: &str = "Could not load restaurants.";

#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    LoadStarted,
    Loaded(Vec<Restaurant>),
    LoadFailed(String),
    /// The draft was blank; nothing was sent.
    CreateRejected,
    Created(Restaurant),
    CreateFailed(String),
    DraftChanged(String),
    AlertDismissed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantFeed {
    pub items: Vec<Restaurant>,
    pub loading: bool,
    /// Shown inline above the list; does not block the page.
    pub load_error: Option<String>,
    /// Contents of the "Restaurant Name" input.
    pub draft: String,
    pub alert: Option<Alert>,
}

impl RestaurantFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn apply(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::LoadStarted => {
                self.loading = true;
                self.load_error = None;
            }
            FeedEvent::Loaded(items) => {
                self.items = items;
                self.loading = false;
            }
            FeedEvent::LoadFailed(_) => {
                self.loading = false;
                self.load_error = Some(LOAD_FAILED.to_string());
            }
            FeedEvent::CreateRejected => {}
            FeedEvent::Created(restaurant) => {
                self.items.insert(0, restaurant);
                self.draft.clear();
            }
            FeedEvent::CreateFailed(_) => {
                self.alert = Some(Alert::new(CREATE_FAILED));
            }
            FeedEvent::DraftChanged(draft) => {
                self.draft = draft;
            }
            FeedEvent::AlertDismissed => {
                self.alert = None;
            }
        }
    }

    /// Whether the card for `restaurant` gets the "Your Restaurant" badge.
    pub fn is_mine(restaurant: &Restaurant, user: Option<&UserInfo>) -> bool {
        user.is_some_and(|u| restaurant.is_owned_by(u))
    }
}

/// A restaurant name is valid when it is non-blank after trimming.
pub fn validate_name(draft: &str) -> Result<&str, ApiError> {
    let name = draft.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Restaurant name is required".to_string()));
    }
    Ok(name)
}

/// Loads and creates restaurants against a backend.
pub struct FeedController<B: Backend + ?Sized> {
    backend: Arc<B>,
}

impl<B: Backend + ?Sized> Clone for FeedController<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: Backend + ?Sized> FeedController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Fetch every restaurant with its owner expanded.
    pub async fn load(&self) -> FeedEvent {
        match self.backend.list_restaurants(&ListOptions::with_owner()).await {
            Ok(page) => {
                tracing::debug!("Loaded {} restaurants", page.data.len());
                FeedEvent::Loaded(page.data)
            }
            Err(e) => {
                tracing::error!("Failed to load restaurants: {}", e);
                FeedEvent::LoadFailed(e.to_string())
            }
        }
    }

    /// Create a restaurant from the draft. A blank draft never reaches the
    /// backend.
    pub async fn create(&self, draft: &str) -> FeedEvent {
        let name = match validate_name(draft) {
            Ok(name) => name,
            Err(_) => return FeedEvent::CreateRejected,
        };
        let request = NewRestaurant {
            name: name.to_string(),
        };
        match self.backend.create_restaurant(&request).await {
            Ok(restaurant) => {
                tracing::info!("Created restaurant {}", restaurant.name);
                FeedEvent::Created(restaurant)
            }
            Err(e) => {
                tracing::error!("Failed to create restaurant: {}", e);
                FeedEvent::CreateFailed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::MemoryBackend;

    async fn signed_in() -> (MemoryBackend, UserInfo, FeedController<MemoryBackend>) {
        let backend = MemoryBackend::new();
        let ana = backend.with_account("Ana", "ana@example.com", "pw");
        backend.login("ana@example.com", "pw").await.unwrap();
        let ctl = FeedController::new(Arc::new(backend.clone()));
        (backend, ana, ctl)
    }

    #[tokio::test]
    async fn load_replaces_items() {
        let (backend, ana, ctl) = signed_in().await;
        backend.with_restaurant("Old Place", None);
        backend.with_restaurant("Ana's Diner", Some(&ana));

        let mut feed = RestaurantFeed::new();
        feed.apply(FeedEvent::LoadStarted);
        assert!(feed.loading);

        feed.apply(ctl.load().await);
        assert!(!feed.loading);
        let names: Vec<_> = feed.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ana's Diner", "Old Place"]);
        assert!(feed.items[0].owner.is_some());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_items_and_flags_error() {
        let (backend, _, ctl) = signed_in().await;
        backend.with_restaurant("Kept", None);

        let mut feed = RestaurantFeed::new();
        feed.apply(ctl.load().await);

        backend.fail_lists(true);
        feed.apply(FeedEvent::LoadStarted);
        feed.apply(ctl.load().await);

        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.load_error.as_deref(), Some(LOAD_FAILED));
        assert!(feed.alert.is_none());
        assert!(!feed.loading);
    }

    #[tokio::test]
    async fn blank_name_makes_no_network_call() {
        let (backend, _, ctl) = signed_in().await;
        let before = backend.calls().len();

        for draft in ["", "   ", "\t\n"] {
            assert_eq!(ctl.create(draft).await, FeedEvent::CreateRejected);
        }

        assert_eq!(backend.calls().len(), before);
        assert_eq!(backend.restaurant_count(), 0);
    }

    #[tokio::test]
    async fn created_restaurant_goes_to_head_and_clears_draft() {
        let (backend, ana, ctl) = signed_in().await;
        backend.with_restaurant("First", None);

        let mut feed = RestaurantFeed::new();
        feed.apply(ctl.load().await);
        feed.apply(FeedEvent::DraftChanged("  Ramen Ya ".to_string()));

        let event = ctl.create(&feed.draft.clone()).await;
        feed.apply(event);

        assert_eq!(feed.items[0].name, "Ramen Ya");
        assert_eq!(feed.items.len(), 2);
        assert!(feed.draft.is_empty());
        assert!(RestaurantFeed::is_mine(&feed.items[0], Some(&ana)));
        assert!(!RestaurantFeed::is_mine(&feed.items[1], Some(&ana)));
    }

    #[tokio::test]
    async fn failed_create_alerts_and_keeps_draft() {
        let (backend, _, ctl) = signed_in().await;
        backend.fail_creates(true);

        let mut feed = RestaurantFeed::new();
        feed.apply(FeedEvent::DraftChanged("Bistro".to_string()));
        feed.apply(ctl.create("Bistro").await);

        assert_eq!(feed.draft, "Bistro");
        assert_eq!(feed.alert, Some(Alert::new(CREATE_FAILED)));
        assert!(feed.is_empty());

        feed.apply(FeedEvent::AlertDismissed);
        assert!(feed.alert.is_none());
    }

    #[test]
    fn ownership_badge_needs_matching_owner() {
        let bob = UserInfo {
            id: "2".into(),
            email: "bob@example.com".into(),
            name: Some("Bob".into()),
            role: None,
        };
        let owned = Restaurant {
            id: "10".into(),
            name: "Bob's".into(),
            description: None,
            owner: Some(api::Owner {
                id: "2".into(),
                name: Some("Bob".into()),
            }),
        };
        let unowned = Restaurant {
            owner: None,
            ..owned.clone()
        };

        assert!(RestaurantFeed::is_mine(&owned, Some(&bob)));
        assert!(!RestaurantFeed::is_mine(&unowned, Some(&bob)));
        assert!(!RestaurantFeed::is_mine(&owned, None));
    }

    #[test]
    fn validate_name_trims() {
        assert_eq!(validate_name("  Deli  ").unwrap(), "Deli");
        assert!(matches!(validate_name(" "), Err(ApiError::Validation(_))));
    }
}
