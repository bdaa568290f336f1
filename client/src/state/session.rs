//! Session store: the single source of truth for "who is logged in".
//!
//! SYSTEM CONTEXT
//! ==============
//! The API client reads the bearer token from here on every request, the auth
//! provider writes it on login, and a 401 anywhere clears it. UI code observes
//! changes through [`SessionStore::subscribe`].
//!
//! INVARIANTS
//! ==========
//! - A session is either complete (token + user) or empty; a half-loaded
//!   session from storage is treated as no session.
//! - The in-memory value is replaced wholesale, never patched field by field.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use tokio::sync::watch;

use super::storage::{KeyValueStorage, StorageError};
use crate::net::types::User;

/// Storage keys that hold one application's session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageNamespace {
    pub token_key: &'static str,
    pub user_key: &'static str,
}

impl StorageNamespace {
    /// Keys used by the admin console.
    pub const ADMIN: Self = Self { token_key: "admin_token", user_key: "admin_user" };
    /// Keys used by the customer/provider web app.
    pub const WEB: Self = Self { token_key: "access_token", user_key: "user" };
}

/// A bearer token and the user it authenticates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty()) && self.user.is_some()
    }
}

/// Persisted, observable session for one application.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    namespace: StorageNamespace,
    state: watch::Sender<Session>,
}

impl SessionStore {
    /// Build a store and load any session already in `storage`.
    ///
    /// Never fails: missing or malformed values yield an empty session.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStorage>, namespace: StorageNamespace) -> Self {
        let session = read_session(storage.as_ref(), namespace);
        let (state, _) = watch::channel(session);
        Self { storage, namespace, state }
    }

    /// Re-read the session from storage, discarding the in-memory copy.
    pub fn reload(&self) {
        let session = read_session(self.storage.as_ref(), self.namespace);
        self.state.send_replace(session);
    }

    /// Persist `token` and `user`, then publish the new session.
    ///
    /// Nothing changes in memory if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if either value could not be written. A token
    /// written before the failure is removed again.
    pub fn set(&self, token: &str, user: &User) -> Result<(), StorageError> {
        let encoded_user = serde_json::to_string(user)?;
        self.storage.set(self.namespace.token_key, token)?;
        if let Err(e) = self.storage.set(self.namespace.user_key, &encoded_user) {
            if let Err(rollback) = self.storage.remove(self.namespace.token_key) {
                tracing::warn!(error = %rollback, "failed to roll back token after user write failed");
            }
            return Err(e);
        }
        self.state.send_replace(Session { token: Some(token.to_owned()), user: Some(user.clone()) });
        tracing::debug!(user_id = %user.id, user_type = %user.user_type, "session established");
        Ok(())
    }

    /// Drop the session from memory and storage.
    ///
    /// Memory is always cleared, even if storage removal fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] hit while removing keys.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.state.send_replace(Session::default());
        let token = self.storage.remove(self.namespace.token_key);
        let user = self.storage.remove(self.namespace.user_key);
        tracing::debug!("session cleared");
        token.and(user)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receive every subsequent session replacement.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn namespace(&self) -> StorageNamespace {
        self.namespace
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("namespace", &self.namespace)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

fn read_session(storage: &dyn KeyValueStorage, namespace: StorageNamespace) -> Session {
    let Some(token) = storage.get(namespace.token_key).filter(|t| !t.is_empty()) else {
        return Session::default();
    };
    let Some(raw_user) = storage.get(namespace.user_key) else {
        return Session::default();
    };
    match serde_json::from_str::<User>(&raw_user) {
        Ok(user) => Session { token: Some(token), user: Some(user) },
        Err(e) => {
            tracing::warn!(key = namespace.user_key, error = %e, "stored user is malformed; starting logged out");
            Session::default()
        }
    }
}
