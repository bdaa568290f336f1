//! Error taxonomy for backend calls.

use crate::state::storage::StorageError;

/// Errors surfaced by [`crate::ApiClient`] calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered 401. The session has already been cleared and the
    /// navigator sent to the login view.
    #[error("authentication failed: {message}")]
    Unauthorized { message: String },

    /// Any other non-2xx answer. `message` is the backend's own text when it
    /// sent one, so it can be shown next to the offending form field.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// No response arrived (DNS, connect, TLS, reset).
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx response whose body did not match the expected schema.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The request could not be built (body serialization, bad header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The session could not be persisted after a successful login.
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Stable machine-readable code for logs and CLI output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "E_UNAUTHORIZED",
            Self::Api { .. } => "E_API",
            Self::Network(_) => "E_NETWORK",
            Self::Decode(_) => "E_DECODE",
            Self::InvalidRequest(_) => "E_INVALID_REQUEST",
            Self::Storage(_) => "E_STORAGE",
        }
    }

    /// Whether the user could reasonably try the same call again.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Api { status: 429 | 500..=599, .. })
    }

    /// HTTP status, when the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
