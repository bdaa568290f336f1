//! Shared API client and session layer for the maintenance marketplace.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both front-ends (the admin console and the customer/provider web app) build
//! one [`ApiClient`] + [`AuthProvider`] pair at their root from an
//! [`AppProfile`], then hand it down to everything that talks to the backend.
//! The profile decides the storage namespace, the role gate and the default
//! backend URL; nothing else differs between the two apps.
//!
//! LAYERS
//! ======
//! - `state::storage`: durable key/value storage (file or memory).
//! - `state::session`: token + user, persisted and observable.
//! - `net`: transport, error translation and endpoint wrappers.
//! - `state::auth`: login/logout and the role gate for UI code.
//! - `util`: navigation capability and route guards.

#[cfg(test)]
mod test_helpers;

pub mod config;
pub mod net;
pub mod state;
pub mod util;

pub use config::{AppProfile, ClientConfig, ConfigError};
pub use net::api::{ApiClient, RequestOptions};
pub use net::error::ApiError;
pub use net::query::Query;
pub use net::transport::{FormPart, HttpTransport, ReqwestTransport};
pub use net::types::{
    GeoPosition, LoginCredentials, LoginResponse, OnlineProviderFilter, ProfileResponse, User, UserType, VerificationAction,
};
pub use state::auth::{AuthProvider, AuthState, AuthWatch, LoginOutcome, RoleGate};
pub use state::session::{Session, SessionStore, StorageNamespace};
pub use state::storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use util::auth::{RouteDecision, guard_protected, guard_public, home_path, should_redirect_unauth};
pub use util::navigate::{LOGIN_PATH, MemoryNavigator, Navigator};
