//! REST client for the marketplace backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call in either front-end goes through [`ApiClient::request`].
//! It attaches the bearer token from the [`SessionStore`], translates
//! responses into [`ApiError`] and owns the single global reaction to a 401:
//! clear the session, send the navigator to the login view, fail the call.
//!
//! ERROR HANDLING
//! ==============
//! There is no retry and no refresh-token flow. A 401 is final for the
//! session; other failures are returned to the caller to display.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::transport::{FormPart, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody, ReqwestTransport};
use super::types::{LoginCredentials, LoginResponse};
use crate::config::ClientConfig;
use crate::state::session::SessionStore;
use crate::state::storage::KeyValueStorage;
use crate::util::navigate::{LOGIN_PATH, Navigator, is_login_path};

const JSON_CONTENT_TYPE: &str = "application/json";
const DEFAULT_UNAUTHORIZED_MESSAGE: &str = "invalid or expired token";

// =============================================================================
// REQUEST OPTIONS
// =============================================================================

/// Method, extra headers and body for one call.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    /// Extra headers; these override the defaults on a name clash.
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    #[must_use]
    pub fn get() -> Self {
        Self { method: Method::GET, headers: Vec::new(), body: RequestBody::Empty }
    }

    #[must_use]
    pub fn delete() -> Self {
        Self { method: Method::DELETE, ..Self::get() }
    }

    #[must_use]
    pub fn json(method: Method, body: Value) -> Self {
        Self { method, headers: Vec::new(), body: RequestBody::Json(body) }
    }

    /// A `multipart/form-data` upload. No JSON content type is attached.
    #[must_use]
    pub fn multipart(method: Method, parts: Vec<FormPart>) -> Self {
        Self { method, headers: Vec::new(), body: RequestBody::Multipart(parts) }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Backend façade shared by every screen of one application.
///
/// Cheap to clone; clones share the transport, session and navigator.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    #[must_use]
    pub fn new(
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                base_url: base_url.trim_end_matches('/').to_owned(),
                transport,
                session,
                navigator,
            }),
        }
    }

    /// Build a reqwest-backed client and load the profile's stored session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be constructed.
    pub fn from_config(
        config: &ClientConfig,
        storage: Arc<dyn KeyValueStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new().map_err(|e| ApiError::Network(e.to_string()))?;
        let session = Arc::new(SessionStore::load(storage, config.profile.namespace()));
        Ok(Self::new(&config.base_url, Arc::new(transport), session, navigator))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.inner.session
    }

    /// Resolve a backend-relative path (e.g. an uploaded document URL) against
    /// the backend origin.
    #[must_use]
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        let origin = self.inner.base_url.strip_suffix("/api").unwrap_or(&self.inner.base_url);
        format!("{origin}/{}", path.trim_start_matches('/'))
    }

    /// Issue one call and return the parsed JSON body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on 401, after the session is cleared and
    ///   the navigator redirected
    /// - [`ApiError::Api`] on any other non-2xx status
    /// - [`ApiError::Network`] when no response arrives
    /// - [`ApiError::Decode`] when a 2xx body is not JSON
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let request = self.build_request(endpoint, options);
        tracing::debug!(method = %request.method, endpoint, "api request");

        let response = match self.inner.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(endpoint, error = %e, "API request failed");
                return Err(ApiError::Network(e.to_string()));
            }
        };

        if response.status == 401 {
            return Err(self.handle_unauthorized(endpoint, &response));
        }
        interpret_response(&response)
    }

    /// [`request`](Self::request) and deserialize the body into `T`.
    ///
    /// # Errors
    ///
    /// As [`request`](Self::request), plus [`ApiError::Decode`] when the body
    /// does not match `T`.
    pub async fn request_as<T: DeserializeOwned>(&self, endpoint: &str, options: RequestOptions) -> Result<T, ApiError> {
        let value = self.request(endpoint, options).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(format!("{endpoint}: {e}")))
    }

    pub(crate) async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::get()).await
    }

    pub(crate) async fn delete(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(endpoint, RequestOptions::delete()).await
    }

    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.request(endpoint, RequestOptions::json(method, body)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value, ApiError> {
        self.send_json(Method::POST, endpoint, body).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Value, ApiError> {
        self.send_json(Method::PUT, endpoint, body).await
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /auth/login` without touching the session.
    ///
    /// # Errors
    ///
    /// As [`request_as`](Self::request_as).
    pub async fn authenticate(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        let body = serde_json::to_value(credentials).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.request_as("/auth/login", RequestOptions::json(Method::POST, body)).await
    }

    /// `POST /auth/login`. When the response carries an access token, the
    /// token and user are stored in the session before this returns, so the
    /// next call already sends the new token.
    ///
    /// # Errors
    ///
    /// As [`authenticate`](Self::authenticate), plus [`ApiError::Storage`] if
    /// the session cannot be persisted.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        let response = self.authenticate(credentials).await?;
        if let Some(token) = response.access_token.as_deref().filter(|t| !t.is_empty()) {
            self.inner.session.set(token, &response.user)?;
        }
        Ok(response)
    }

    /// Best-effort `POST /auth/logout`, then clear the local session.
    ///
    /// The local session is cleared whatever the remote call returns.
    ///
    /// # Errors
    ///
    /// Returns the remote call's error, for logging only.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let remote = if self.inner.session.token().is_some() {
            self.post("/auth/logout", &serde_json::json!({})).await.map(|_| ())
        } else {
            Ok(())
        };
        if let Err(e) = self.inner.session.clear() {
            tracing::warn!(error = %e, "failed to remove stored session on logout");
        }
        remote
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn build_request(&self, endpoint: &str, options: RequestOptions) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(token) = self.inner.session.token() {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        if !matches!(options.body, RequestBody::Multipart(_)) {
            headers.push(("Content-Type".to_owned(), JSON_CONTENT_TYPE.to_owned()));
        }
        for (name, value) in options.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        HttpRequest {
            method: options.method,
            url: format!("{}{endpoint}", self.inner.base_url),
            headers,
            body: options.body,
        }
    }

    fn handle_unauthorized(&self, endpoint: &str, response: &HttpResponse) -> ApiError {
        if let Err(e) = self.inner.session.clear() {
            tracing::warn!(error = %e, "failed to remove stored session after 401");
        }
        let current = self.inner.navigator.current_path();
        if is_login_path(&current) {
            tracing::debug!(endpoint, "401 on login view; no redirect");
        } else {
            tracing::warn!(endpoint, from = %current, "session rejected by backend; redirecting to login");
            self.inner.navigator.navigate(LOGIN_PATH);
        }
        let message = parse_json(&response.body)
            .as_ref()
            .and_then(backend_message)
            .unwrap_or_else(|| DEFAULT_UNAUTHORIZED_MESSAGE.to_owned());
        ApiError::Unauthorized { message }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// RESPONSE TRANSLATION
// =============================================================================

/// Translate a non-401 response into the body or an [`ApiError`].
fn interpret_response(response: &HttpResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        let message = parse_json(&response.body)
            .as_ref()
            .and_then(backend_message)
            .unwrap_or_else(|| http_status_message(response.status));
        return Err(ApiError::Api { status: response.status, message });
    }

    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    parse_json(&response.body).ok_or_else(|| {
        tracing::error!(
            status = response.status,
            content_type = response.content_type.as_deref().unwrap_or("<none>"),
            "non-JSON response from backend"
        );
        ApiError::Decode(format!("Server returned non-JSON response: {}", response.status))
    })
}

fn parse_json(body: &str) -> Option<Value> {
    serde_json::from_str(body).ok()
}

/// Human-readable text from a backend error body: `message`, then `error`.
fn backend_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_owned)
}

fn http_status_message(status: u16) -> String {
    format!("HTTP error! status: {status}")
}
