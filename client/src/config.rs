//! Application profiles and backend configuration parsed from environment
//! variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;
use std::str::FromStr;

use crate::net::types::UserType;
use crate::state::auth::RoleGate;
use crate::state::session::StorageNamespace;

pub const BASE_URL_ENV: &str = "MAINTENANCE_API_BASE_URL";
pub const APP_ENV: &str = "MAINTENANCE_APP";

pub const DEFAULT_ADMIN_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_WEB_BASE_URL: &str = "https://maintenance-platform-backend.onrender.com/api";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),

    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Which front-end is running. Fixes the storage namespace, the role gate and
/// the fallback backend URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppProfile {
    /// Admin console: admin accounts only.
    Admin,
    /// Customer/provider web app: any account type.
    Web,
}

impl AppProfile {
    #[must_use]
    pub fn namespace(self) -> StorageNamespace {
        match self {
            Self::Admin => StorageNamespace::ADMIN,
            Self::Web => StorageNamespace::WEB,
        }
    }

    #[must_use]
    pub fn role_gate(self) -> RoleGate {
        match self {
            Self::Admin => RoleGate::Require(UserType::Admin),
            Self::Web => RoleGate::Open,
        }
    }

    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Admin => DEFAULT_ADMIN_BASE_URL,
            Self::Web => DEFAULT_WEB_BASE_URL,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for AppProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "web" | "customer" | "provider" => Ok(Self::Web),
            other => Err(ConfigError::Parse(format!("unknown app profile `{other}` (expected admin or web)"))),
        }
    }
}

/// Resolved client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub profile: AppProfile,
    /// Backend root including the `/api` prefix, without a trailing slash.
    pub base_url: String,
}

impl ClientConfig {
    /// Profile defaults with no environment lookups.
    #[must_use]
    pub fn new(profile: AppProfile) -> Self {
        Self { profile, base_url: profile.default_base_url().to_owned() }
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `MAINTENANCE_APP`: `web` (default) or `admin`
    /// - `MAINTENANCE_API_BASE_URL`: profile default when absent or blank
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown profile or an unparseable URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let profile = parse_profile(std::env::var(APP_ENV).ok().as_deref())?;
        Self::new(profile).with_base_url_opt(std::env::var(BASE_URL_ENV).ok().as_deref())
    }

    /// Override the base URL. Blank values keep the current one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless `url` is an absolute
    /// http(s) URL.
    pub fn with_base_url_opt(mut self, url: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            self.base_url = normalize_base_url(url)?;
        }
        Ok(self)
    }

    /// Backend origin without the `/api` suffix, for absolute asset links.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.base_url.strip_suffix("/api").unwrap_or(&self.base_url)
    }
}

fn parse_profile(raw: Option<&str>) -> Result<AppProfile, ConfigError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(AppProfile::Web),
        Some(raw) => raw.parse(),
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(raw).map_err(|e| ConfigError::InvalidBaseUrl { url: raw.to_owned(), reason: e.to_string() })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl { url: raw.to_owned(), reason: "scheme must be http or https".to_owned() });
    }
    Ok(raw.trim_end_matches('/').to_owned())
}
