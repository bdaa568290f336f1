//! Fakes and fixtures shared by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::config::AppProfile;
use crate::net::api::ApiClient;
use crate::net::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::net::types::{User, UserType};
use crate::state::session::SessionStore;
use crate::state::storage::MemoryStorage;
use crate::util::navigate::MemoryNavigator;

pub(crate) const BASE_URL: &str = "http://backend.test/api";

// =============================================================================
// MockTransport
// =============================================================================

/// Transport that replays scripted responses and records every request.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_json(&self, status: u16, body: Value) {
        self.push_raw(status, Some("application/json"), &body.to_string());
    }

    pub(crate) fn push_raw(&self, status: u16, content_type: Option<&str>, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            content_type: content_type.map(str::to_owned),
            body: body.to_owned(),
        }));
    }

    pub(crate) fn push_network_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Send(message.to_owned())));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Send("no scripted response".to_owned())))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub(crate) fn user(user_type: UserType) -> User {
    serde_json::from_value(user_json(user_type)).unwrap()
}

pub(crate) fn user_json(user_type: UserType) -> Value {
    serde_json::json!({
        "id": format!("{}-1", user_type.as_str()),
        "email": format!("{}@example.com", user_type.as_str()),
        "phone": null,
        "user_type": user_type.as_str(),
        "status": "active",
        "is_verified": true
    })
}

pub(crate) fn login_body(token: &str, user_type: UserType) -> Value {
    serde_json::json!({
        "message": "Login successful",
        "access_token": token,
        "refresh_token": "refresh-unused",
        "user": user_json(user_type),
        "profile": null
    })
}

/// An [`ApiClient`] wired to in-memory fakes.
pub(crate) struct Harness {
    pub transport: Arc<MockTransport>,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<MemoryNavigator>,
    pub api: ApiClient,
}

pub(crate) fn harness(profile: AppProfile, start_path: &str) -> Harness {
    harness_with_storage(profile, start_path, Arc::new(MemoryStorage::new()))
}

pub(crate) fn harness_with_storage(profile: AppProfile, start_path: &str, storage: Arc<MemoryStorage>) -> Harness {
    let transport = Arc::new(MockTransport::new());
    let navigator = Arc::new(MemoryNavigator::new(start_path));
    let session = Arc::new(SessionStore::load(storage.clone(), profile.namespace()));
    let api = ApiClient::new(BASE_URL, transport.clone(), session, navigator.clone());
    Harness { transport, storage, navigator, api }
}
