//! Typed request/response schemas for the marketplace REST API.
//!
//! DESIGN
//! ======
//! Responses that the session layer depends on (login, profile) are validated
//! into these types at the client boundary, so callers never dig through loosely
//! shaped JSON. Fields the layer does not interpret are kept in `extra` maps
//! so a user record written to storage reads back unchanged.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// USERS
// =============================================================================

/// Account role as reported by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Customer,
    ServiceProvider,
    Admin,
}

impl UserType {
    /// Wire name (e.g. `"service_provider"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::ServiceProvider => "service_provider",
            Self::Admin => "admin",
        }
    }

    /// Human-readable label used in user-facing messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::ServiceProvider => "Service provider",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "customer" => Ok(Self::Customer),
            "service_provider" => Ok(Self::ServiceProvider),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown user type `{other}`")),
        }
    }
}

/// An account as returned by `/auth/login` and `/auth/profile`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier. Numeric ids are normalized to strings.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Login email; absent for phone-only accounts.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub user_type: UserType,
    /// Account status (e.g. `"active"`, `"suspended"`).
    #[serde(default = "default_status")]
    pub status: String,
    /// Remaining profile fields (`is_verified`, timestamps, names, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user_type == UserType::Admin
    }

    /// Email if present, otherwise phone, otherwise the id.
    #[must_use]
    pub fn display_identity(&self) -> &str {
        self.email
            .as_deref()
            .or(self.phone.as_deref())
            .unwrap_or(&self.id)
    }
}

fn default_status() -> String {
    "active".to_owned()
}

// =============================================================================
// AUTH
// =============================================================================

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email_or_phone: String,
    pub password: String,
}

impl LoginCredentials {
    #[must_use]
    pub fn new(email_or_phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email_or_phone: email_or_phone.into(), password: password.into() }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email_or_phone", &self.email_or_phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful `POST /auth/login` response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token; the session is only established when present.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Issued by the backend but unused: there is no refresh flow.
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
    /// Role-specific profile (customer or provider), when one exists.
    #[serde(default)]
    pub profile: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /auth/profile` response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
    #[serde(default)]
    pub profile: Option<Value>,
}

// =============================================================================
// PROVIDERS
// =============================================================================

/// A device position reported by a provider or customer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// Body of `POST /providers/status`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OnlineStatusUpdate {
    pub is_online: bool,
    /// Only sent when going online.
    #[serde(flatten)]
    pub position: Option<GeoPosition>,
}

impl OnlineStatusUpdate {
    #[must_use]
    pub fn new(is_online: bool, position: Option<GeoPosition>) -> Self {
        Self { is_online, position: position.filter(|_| is_online) }
    }
}

/// Filters for `GET /providers/online`. Unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OnlineProviderFilter {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
    pub service_id: Option<String>,
}

/// Admin decision on a provider's verification documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationAction {
    Approve,
    Reject,
}

#[derive(Debug, Serialize)]
pub(crate) struct VerificationDecision<'a> {
    pub action: VerificationAction,
    pub reason: Option<&'a str>,
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(id) if !id.is_empty() => Ok(id),
        Value::Number(number) => Ok(number.to_string()),
        _ => Err(D::Error::custom("expected non-empty string or number id")),
    }
}
