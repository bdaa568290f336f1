//! Navigation capability injected into the API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! A 401 from the backend must send the user back to the login view. The API
//! client never touches a real router; it asks a [`Navigator`] where the user
//! currently is and tells it where to go.

#[cfg(test)]
#[path = "navigate_test.rs"]
mod navigate_test;

use std::sync::{Mutex, PoisonError};

/// Path of the login view in both front-ends.
pub const LOGIN_PATH: &str = "/login";

/// Router handle used for the global "session expired" redirect.
pub trait Navigator: Send + Sync {
    /// Path of the view currently shown (may include a query string).
    fn current_path(&self) -> String;

    /// Replace the current view with `path`.
    fn navigate(&self, path: &str);
}

/// True when `path` points at the login view, ignoring query and fragment.
#[must_use]
pub fn is_login_path(path: &str) -> bool {
    let route = path.split(['?', '#']).next().unwrap_or_default();
    route.trim_end_matches('/') == LOGIN_PATH
}

/// Headless navigator that tracks the current path and every navigation.
///
/// Used by the CLI front-end and by tests in place of a browser router.
#[derive(Debug)]
pub struct MemoryNavigator {
    current: Mutex<String>,
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new(start: &str) -> Self {
        Self { current: Mutex::new(start.to_owned()), history: Mutex::new(Vec::new()) }
    }

    /// Paths navigated to since construction, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// True if a navigation to the login view has happened.
    #[must_use]
    pub fn redirected_to_login(&self) -> bool {
        self.history().iter().any(|path| is_login_path(path))
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn navigate(&self, path: &str) {
        path.clone_into(&mut self.current.lock().unwrap_or_else(PoisonError::into_inner));
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_owned());
    }
}
