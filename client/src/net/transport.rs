//! HTTP transport seam.
//!
//! DESIGN
//! ======
//! [`ApiClient`](crate::ApiClient) builds a fully resolved [`HttpRequest`] and
//! hands it to an [`HttpTransport`]. Production uses [`ReqwestTransport`];
//! tests script responses through a mock. The transport does no status
//! interpretation: every answered request is `Ok`, whatever its status.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

pub use reqwest::Method;

/// Transport-level failure: the request never produced a response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request could not be built: {0}")]
    Build(String),

    #[error("request failed: {0}")]
    Send(String),
}

/// Payload of an outbound request.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Serialized as JSON text.
    Json(Value),
    /// Sent as `multipart/form-data`; the transport picks the boundary.
    Multipart(Vec<FormPart>),
}

/// One field of a multipart body.
#[derive(Clone, Debug, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormValue {
    Text(String),
    File { file_name: String, content_type: Option<String>, bytes: Vec<u8> },
}

impl FormPart {
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: FormValue::Text(value.into()) }
    }

    #[must_use]
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self { name: name.into(), value: FormValue::File { file_name: file_name.into(), content_type, bytes } }
    }
}

/// A fully resolved request: absolute URL, final headers, body.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw answer from the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends resolved requests to the backend.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue `request` and return whatever the server answered.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only when no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =============================================================================
// REQWEST
// =============================================================================

/// [`HttpTransport`] over a shared `reqwest` connection pool.
///
/// No timeout is configured; reqwest's defaults apply.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a fresh connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the TLS backend fails to initialize.
    pub fn new() -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { http })
    }

    /// Reuse an existing client (shared pools, custom proxies).
    #[must_use]
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.http.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        let response = builder.send().await.map_err(|e| TransportError::Send(e.to_string()))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await.map_err(|e| TransportError::Send(e.to_string()))?;
        Ok(HttpResponse { status, content_type, body })
    }
}

fn multipart_form(parts: Vec<FormPart>) -> Result<reqwest::multipart::Form, TransportError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part.value {
            FormValue::Text(text) => form.text(part.name, text),
            FormValue::File { file_name, content_type, bytes } => {
                let mut file = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
                if let Some(content_type) = content_type {
                    file = file
                        .mime_str(&content_type)
                        .map_err(|e| TransportError::Build(e.to_string()))?;
                }
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}
