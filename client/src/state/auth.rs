//! Auth state for the signed-in user of one application.
//!
//! SYSTEM CONTEXT
//! ==============
//! UI code calls [`AuthProvider::login`] / [`AuthProvider::logout`] and reads
//! [`AuthState`] to drive route guards and identity-dependent rendering. The
//! provider sits on top of the [`ApiClient`] and its session store.
//!
//! DESIGN
//! ======
//! Login runs `authenticate`, then the [`RoleGate`], and only then persists
//! the session. A user the gate rejects never has a token written to storage.
//!
//! The user half of [`AuthState`] is read from the session store's own watch
//! channel; the provider only owns the loading flag. A session dropped by a
//! 401 on some background call reaches every [`AuthWatch`] without the
//! provider being involved.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use tokio::sync::watch;
use tokio::sync::watch::error::RecvError;

use super::session::Session;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{LoginCredentials, User, UserType};

const MISSING_TOKEN_MESSAGE: &str = "Login failed: no access token returned";

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True only while a login or logout is in flight.
    pub loading: bool,
}

impl AuthState {
    fn from_session(session: &Session, loading: bool) -> Self {
        let user = if session.is_authenticated() { session.user.clone() } else { None };
        Self { user, loading }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Change feed for [`AuthState`]: session replacements merged with the
/// provider's loading flag.
#[derive(Clone, Debug)]
pub struct AuthWatch {
    session: watch::Receiver<Session>,
    loading: watch::Receiver<bool>,
}

impl AuthWatch {
    /// State as of now, without marking it seen.
    #[must_use]
    pub fn current(&self) -> AuthState {
        AuthState::from_session(&self.session.borrow(), *self.loading.borrow())
    }

    /// State as of now, marking both halves seen.
    pub fn latest(&mut self) -> AuthState {
        let loading = *self.loading.borrow_and_update();
        AuthState::from_session(&self.session.borrow_and_update(), loading)
    }

    /// True when either half changed since it was last seen.
    ///
    /// # Errors
    ///
    /// Returns [`RecvError`] once the session store or the provider is gone.
    pub fn has_changed(&self) -> Result<bool, RecvError> {
        Ok(self.session.has_changed()? || self.loading.has_changed()?)
    }

    /// Wait for the next change to either half.
    ///
    /// # Errors
    ///
    /// Returns [`RecvError`] once the session store or the provider is gone.
    pub async fn changed(&mut self) -> Result<(), RecvError> {
        tokio::select! {
            result = self.session.changed() => result,
            result = self.loading.changed() => result,
        }
    }
}

// =============================================================================
// ROLE GATE
// =============================================================================

/// Which accounts may sign in to an application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleGate {
    /// Any account type.
    Open,
    /// Only accounts of this type.
    Require(UserType),
}

impl RoleGate {
    #[must_use]
    pub fn admits(self, user: &User) -> bool {
        match self {
            Self::Open => true,
            Self::Require(user_type) => user.user_type == user_type,
        }
    }

    /// Message shown when [`admits`](Self::admits) is false.
    #[must_use]
    pub fn denial_message(self) -> String {
        match self {
            Self::Open => String::new(),
            Self::Require(UserType::Admin) => "Access denied. Admin privileges required.".to_owned(),
            Self::Require(user_type) => format!("Access denied. {} privileges required.", user_type.label()),
        }
    }
}

// =============================================================================
// LOGIN OUTCOME
// =============================================================================

/// Result of [`AuthProvider::login`]. Failures carry a display message.
#[derive(Clone, Debug, PartialEq)]
pub enum LoginOutcome {
    Success(User),
    /// Credentials were valid but the role gate rejected the account.
    AccessDenied { message: String },
    Failed { message: String },
}

impl LoginOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Success(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::AccessDenied { message } | Self::Failed { message } => Some(message),
        }
    }
}

/// User-facing text for a failed login call.
fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized { message } => message.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// PROVIDER
// =============================================================================

pub struct AuthProvider {
    api: ApiClient,
    gate: RoleGate,
    loading: watch::Sender<bool>,
}

impl AuthProvider {
    /// Start from whatever session the client's store already holds.
    #[must_use]
    pub fn new(api: ApiClient, gate: RoleGate) -> Self {
        let (loading, _) = watch::channel(false);
        Self { api, gate, loading }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn gate(&self) -> RoleGate {
        self.gate
    }

    /// Sign in. Never fails: every error becomes a [`LoginOutcome`].
    pub async fn login(&self, credentials: &LoginCredentials) -> LoginOutcome {
        self.loading.send_replace(true);
        let outcome = self.try_login(credentials).await;
        self.loading.send_replace(false);
        match &outcome {
            LoginOutcome::Success(user) => tracing::info!(user_id = %user.id, user_type = %user.user_type, "login succeeded"),
            LoginOutcome::AccessDenied { .. } => tracing::warn!("login rejected by role gate"),
            LoginOutcome::Failed { message } => tracing::debug!(%message, "login failed"),
        }
        outcome
    }

    async fn try_login(&self, credentials: &LoginCredentials) -> LoginOutcome {
        let response = match self.api.authenticate(credentials).await {
            Ok(response) => response,
            Err(e) => return LoginOutcome::Failed { message: failure_message(&e) },
        };
        let Some(token) = response.access_token.filter(|t| !t.is_empty()) else {
            return LoginOutcome::Failed { message: MISSING_TOKEN_MESSAGE.to_owned() };
        };
        if !self.gate.admits(&response.user) {
            return LoginOutcome::AccessDenied { message: self.gate.denial_message() };
        }
        if let Err(e) = self.api.session().set(&token, &response.user) {
            return LoginOutcome::Failed { message: failure_message(&ApiError::from(e)) };
        }
        LoginOutcome::Success(response.user)
    }

    /// Sign out. The remote call is best-effort; the local session is always
    /// cleared.
    pub async fn logout(&self) {
        self.loading.send_replace(true);
        if let Err(e) = self.api.logout().await {
            tracing::debug!(error = %e, "remote logout failed; local session cleared anyway");
        }
        self.loading.send_replace(false);
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        AuthState::from_session(&self.api.session().snapshot(), *self.loading.borrow())
    }

    /// Receive subsequent state changes, including sign-outs caused by a 401
    /// on any call made through the same client.
    #[must_use]
    pub fn subscribe(&self) -> AuthWatch {
        AuthWatch { session: self.api.session().subscribe(), loading: self.loading.subscribe() }
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state().user
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        *self.loading.borrow()
    }
}

impl std::fmt::Debug for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthProvider")
            .field("gate", &self.gate)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
