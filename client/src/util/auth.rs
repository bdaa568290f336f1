//! Route guards shared by the web app's protected and public views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components must apply identical redirect rules. Each guard is a pure
//! function of [`AuthState`]; the caller performs the navigation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::UserType;
use crate::state::auth::AuthState;
use crate::util::navigate::LOGIN_PATH;

/// What a route should do for the current auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Auth is still loading; render a placeholder.
    Wait,
    Allow,
    Redirect(&'static str),
}

/// Landing view for each account type.
#[must_use]
pub fn home_path(user_type: UserType) -> &'static str {
    match user_type {
        UserType::Customer => "/dashboard",
        UserType::ServiceProvider => "/provider-dashboard",
        UserType::Admin => "/admin-dashboard",
    }
}

/// Guard for views that need a signed-in user, optionally of one type.
///
/// A user of the wrong type is sent to their own home view.
#[must_use]
pub fn guard_protected(state: &AuthState, required: Option<UserType>) -> RouteDecision {
    if state.loading {
        return RouteDecision::Wait;
    }
    match (&state.user, required) {
        (None, _) => RouteDecision::Redirect(LOGIN_PATH),
        (Some(user), Some(required)) if user.user_type != required => RouteDecision::Redirect(home_path(user.user_type)),
        (Some(_), _) => RouteDecision::Allow,
    }
}

/// Guard for login/register views: signed-in users go to their home view.
#[must_use]
pub fn guard_public(state: &AuthState) -> RouteDecision {
    if state.loading {
        return RouteDecision::Wait;
    }
    match &state.user {
        Some(user) => RouteDecision::Redirect(home_path(user.user_type)),
        None => RouteDecision::Allow,
    }
}

/// True once auth has loaded and no user is present.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}
