use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::models::{
    ListOptions, NewRestaurant, Owner, Paginated, Restaurant, SignupRequest, UserInfo,
};
use crate::{ApiError, Backend, Result};

#[derive(Debug, Clone)]
struct Account {
    user: UserInfo,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    accounts: Vec<Account>,
    restaurants: Vec<Restaurant>,
    session: Option<String>,
    next_id: u64,
    offline: bool,
    fail_lists: bool,
    fail_creates: bool,
    fail_logins: bool,
    delays: Vec<(&'static str, Duration)>,
    calls: Vec<&'static str>,
}

impl State {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    fn session_user(&self) -> Option<&UserInfo> {
        let id = self.session.as_ref()?;
        self.accounts
            .iter()
            .map(|a| &a.user)
            .find(|u| &u.id == id)
    }
}

/// In-memory backend for tests and offline demos.
///
/// Records live in a shared `Mutex`, so clones observe the same data. Fault
/// switches make individual operations fail the way the hosted service would.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register an account directly, bypassing signup. Returns the new user.
    pub fn with_account(&self, name: &str, email: &str, password: &str) -> UserInfo {
        let mut state = self.lock();
        let user = UserInfo {
            id: state.next_id(),
            email: email.to_string(),
            name: Some(name.to_string()),
            role: Some(crate::models::DEFAULT_ROLE.to_string()),
        };
        state.accounts.push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        user
    }

    /// Seed a restaurant, optionally owned by `owner`.
    pub fn with_restaurant(&self, name: &str, owner: Option<&UserInfo>) -> Restaurant {
        let mut state = self.lock();
        let restaurant = Restaurant {
            id: state.next_id(),
            name: name.to_string(),
            description: None,
            owner: owner.map(|u| Owner {
                id: u.id.clone(),
                name: u.name.clone(),
            }),
        };
        state.restaurants.insert(0, restaurant.clone());
        restaurant
    }

    /// Simulate an unreachable backend: every call fails with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    pub fn fail_lists(&self, fail: bool) {
        self.lock().fail_lists = fail;
    }

    pub fn fail_creates(&self, fail: bool) {
        self.lock().fail_creates = fail;
    }

    /// Reject every login even with correct credentials.
    pub fn fail_logins(&self, fail: bool) {
        self.lock().fail_logins = fail;
    }

    /// Make operation `op` (e.g. `"health"`) wait `duration` before answering.
    pub fn delay(&self, op: &'static str, duration: Duration) {
        let mut state = self.lock();
        state.delays.retain(|(o, _)| *o != op);
        state.delays.push((op, duration));
    }

    /// Names of the backend operations invoked so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    pub fn restaurant_count(&self) -> usize {
        self.lock().restaurants.len()
    }

    async fn pause(&self, op: &'static str) {
        let delay = self
            .lock()
            .delays
            .iter()
            .find(|(o, _)| *o == op)
            .map(|(_, d)| *d);
        if let Some(duration) = delay {
            sleep(duration).await;
        }
    }

    /// Record the call and fail if offline.
    fn enter(&self, op: &'static str) -> Result<MutexGuard<'_, State>> {
        let mut state = self.lock();
        state.calls.push(op);
        if state.offline {
            return Err(ApiError::Network(format!("{op}: backend unreachable")));
        }
        Ok(state)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Backend for MemoryBackend {
    async fn health(&self) -> Result<()> {
        self.pause("health").await;
        self.enter("health").map(|_| ())
    }

    async fn login(&self, email: &str, password: &str) -> Result<()> {
        self.pause("login").await;
        let mut state = self.enter("login")?;
        if state.fail_logins {
            return Err(ApiError::Auth("Invalid credentials".to_string()));
        }
        let id = state
            .accounts
            .iter()
            .find(|a| a.user.email == email && a.password == password)
            .map(|a| a.user.id.clone())
            .ok_or_else(|| ApiError::Auth("Invalid credentials".to_string()))?;
        state.session = Some(id);
        Ok(())
    }

    async fn logout(&self) {
        let mut state = self.lock();
        state.calls.push("logout");
        state.session = None;
    }

    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        self.pause("signup").await;
        let mut state = self.enter("signup")?;
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(ApiError::Validation("email and password are required".to_string()));
        }
        if state.accounts.iter().any(|a| a.user.email == request.email) {
            return Err(ApiError::Validation("email already exists".to_string()));
        }
        let user = UserInfo {
            id: state.next_id(),
            email: request.email.clone(),
            name: Some(request.name.clone()),
            role: Some(request.role.clone()),
        };
        state.accounts.push(Account {
            user,
            password: request.password.clone(),
        });
        Ok(())
    }

    async fn current_user(&self) -> Result<UserInfo> {
        self.pause("current_user").await;
        let state = self.enter("current_user")?;
        state.session_user().cloned().ok_or(ApiError::NoSession)
    }

    async fn list_restaurants(&self, options: &ListOptions) -> Result<Paginated<Restaurant>> {
        self.pause("list_restaurants").await;
        let state = self.enter("list_restaurants")?;
        if state.fail_lists {
            return Err(ApiError::Network("list failed".to_string()));
        }
        let expand_owner = options.include.iter().any(|r| r == "owner");
        let data = state
            .restaurants
            .iter()
            .cloned()
            .map(|mut r| {
                if !expand_owner {
                    r.owner = None;
                }
                r
            })
            .collect();
        Ok(Paginated::single_page(data))
    }

    async fn create_restaurant(&self, restaurant: &NewRestaurant) -> Result<Restaurant> {
        self.pause("create_restaurant").await;
        let mut state = self.enter("create_restaurant")?;
        if state.fail_creates {
            return Err(ApiError::Network("create failed".to_string()));
        }
        if restaurant.name.trim().is_empty() {
            return Err(ApiError::Validation("name should not be empty".to_string()));
        }
        let owner = state.session_user().map(|u| Owner {
            id: u.id.clone(),
            name: u.name.clone(),
        });
        let created = Restaurant {
            id: state.next_id(),
            name: restaurant.name.clone(),
            description: None,
            owner,
        };
        state.restaurants.insert(0, created.clone());
        Ok(created)
    }

    fn admin_url(&self) -> String {
        "memory://admin".to_string()
    }
}

async fn sleep(duration: Duration) {
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
}
