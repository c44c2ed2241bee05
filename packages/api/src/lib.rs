//! # API crate: the hosted backend boundary for FlavorFind
//!
//! Everything the client needs from its backend-as-a-service lives here,
//! behind the [`Backend`] capability trait. One backend instance is built at
//! startup and passed explicitly to every consumer.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `UserInfo`, `Restaurant`, request payloads and the paginated list envelope |
//! | [`backend`] | The [`Backend`] trait: health, login, logout, signup, current user, list, create |
//! | [`manifest`] | [`ManifestClient`], the production implementation over the Manifest REST API |
//! | [`memory`] | [`MemoryBackend`], an in-memory implementation with fault switches for tests |
//! | [`io`] | The injectable [`io::HttpClient`] and its reqwest implementation |
//! | [`probe`] | The startup connectivity check |
//! | [`settings`] | Process-wide settings: backend URL, application id, demo fixture |

pub mod backend;
pub mod error;
pub mod io;
pub mod manifest;
pub mod memory;
pub mod models;
pub mod probe;
pub mod settings;

pub use backend::Backend;
pub use error::{ApiError, Result};
pub use manifest::ManifestClient;
pub use memory::MemoryBackend;
pub use models::{
    Credentials, ListOptions, NewRestaurant, Owner, Paginated, Restaurant, SignupRequest,
    UserInfo,
};
pub use probe::{test_connection, ConnectionStatus};
pub use settings::{BackendSettings, DemoSettings, Settings};
