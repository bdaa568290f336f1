//! Account, catalogue, booking and provider endpoints used by the
//! customer/provider web app.
//!
//! Thin wrappers only: each fixes a path, a method and a body shape for
//! [`ApiClient::request`]. Responses the UI merely renders stay as JSON.

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use serde::Serialize;
use serde_json::Value;

use super::api::{ApiClient, RequestOptions};
use super::error::ApiError;
use super::query::{Query, path_segment};
use super::transport::{FormPart, Method};
use super::types::{GeoPosition, OnlineProviderFilter, OnlineStatusUpdate, ProfileResponse, VerificationAction, VerificationDecision};

fn lang_query(language: &str) -> Query {
    Query::new().with("lang", language)
}

fn online_providers_query(filter: &OnlineProviderFilter) -> Query {
    Query::new()
        .with_opt("latitude", filter.latitude)
        .with_opt("longitude", filter.longitude)
        .with_opt("radius", filter.radius)
        .with_opt("service_id", filter.service_id.as_deref())
}

impl ApiClient {
    // =========================================================================
    // ACCOUNT
    // =========================================================================

    /// `POST /auth/register`. Does not sign the new account in.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; validation failures carry the backend message.
    pub async fn register<B: Serialize + ?Sized>(&self, user_data: &B) -> Result<Value, ApiError> {
        self.post("/auth/register", user_data).await
    }

    /// `GET /auth/profile`, validated into [`ProfileResponse`].
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_profile(&self) -> Result<ProfileResponse, ApiError> {
        self.request_as("/auth/profile", RequestOptions::get()).await
    }

    /// `PUT /auth/profile`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_profile<B: Serialize + ?Sized>(&self, profile_data: &B) -> Result<Value, ApiError> {
        self.put("/auth/profile", profile_data).await
    }

    /// `POST /auth/change-password`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn change_password<B: Serialize + ?Sized>(&self, password_data: &B) -> Result<Value, ApiError> {
        self.post("/auth/change-password", password_data).await
    }

    /// `GET /health`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn health_check(&self) -> Result<Value, ApiError> {
        self.get("/health").await
    }

    // =========================================================================
    // CATALOGUE
    // =========================================================================

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_service_categories(&self, language: &str) -> Result<Value, ApiError> {
        self.get(&lang_query(language).apply("/services/categories")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_category_services(&self, category_id: &str, language: &str) -> Result<Value, ApiError> {
        let path = format!("/services/categories/{}/services", path_segment(category_id));
        self.get(&lang_query(language).apply(&path)).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_service(&self, service_id: &str, language: &str) -> Result<Value, ApiError> {
        self.get(&lang_query(language).apply(&format!("/services/{}", path_segment(service_id)))).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn search_providers<B: Serialize + ?Sized>(&self, search: &B) -> Result<Value, ApiError> {
        self.post("/services/search", search).await
    }

    // =========================================================================
    // BOOKINGS
    // =========================================================================

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn create_booking<B: Serialize + ?Sized>(&self, booking: &B) -> Result<Value, ApiError> {
        self.post("/services/bookings", booking).await
    }

    /// Bookings visible to the signed-in customer or provider.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_bookings(&self, query: &Query) -> Result<Value, ApiError> {
        self.get(&query.apply("/services/bookings")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_booking(&self, booking_id: &str) -> Result<Value, ApiError> {
        self.get(&format!("/services/bookings/{}", path_segment(booking_id))).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_booking_status<B: Serialize + ?Sized>(&self, booking_id: &str, status: &B) -> Result<Value, ApiError> {
        self.put(&format!("/services/bookings/{}/status", path_segment(booking_id)), status).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn create_review<B: Serialize + ?Sized>(&self, booking_id: &str, review: &B) -> Result<Value, ApiError> {
        self.post(&format!("/services/bookings/{}/review", path_segment(booking_id)), review).await
    }

    // =========================================================================
    // CUSTOMERS
    // =========================================================================

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_customer_location<B: Serialize + ?Sized>(&self, location: &B) -> Result<Value, ApiError> {
        self.post("/customers/location", location).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_customer_location(&self) -> Result<Value, ApiError> {
        self.get("/customers/location").await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_nearby_providers<B: Serialize + ?Sized>(&self, search: &B) -> Result<Value, ApiError> {
        self.post("/customers/nearby-providers", search).await
    }

    // =========================================================================
    // PROVIDERS
    // =========================================================================

    /// The signed-in provider's own profile.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_provider_profile(&self) -> Result<Value, ApiError> {
        self.get("/providers/profile").await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_public_provider_profile(&self, provider_id: &str) -> Result<Value, ApiError> {
        self.get(&format!("/providers/{}", path_segment(provider_id))).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn add_provider_service<B: Serialize + ?Sized>(&self, service: &B) -> Result<Value, ApiError> {
        self.post("/providers/services", service).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_provider_service<B: Serialize + ?Sized>(&self, service_id: &str, service: &B) -> Result<Value, ApiError> {
        self.put(&format!("/providers/services/{}", path_segment(service_id)), service).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_location<B: Serialize + ?Sized>(&self, location: &B) -> Result<Value, ApiError> {
        self.post("/providers/location", location).await
    }

    /// Online providers near a point. Unset filter fields are left out of the
    /// query string.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_online_providers(&self, filter: &OnlineProviderFilter) -> Result<Value, ApiError> {
        self.get(&online_providers_query(filter).apply("/providers/online")).await
    }

    /// Toggle availability. The position is sent only when going online.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_online_status(&self, is_online: bool, position: Option<GeoPosition>) -> Result<Value, ApiError> {
        self.post("/providers/status", &OnlineStatusUpdate::new(is_online, position)).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_live_location(&self, position: &GeoPosition) -> Result<Value, ApiError> {
        self.post("/providers/live-location", position).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_availability<B: Serialize + ?Sized>(&self, availability: &B) -> Result<Value, ApiError> {
        self.put("/providers/availability", availability).await
    }

    /// Document metadata as JSON (`POST /providers/documents`).
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn upload_document<B: Serialize + ?Sized>(&self, document: &B) -> Result<Value, ApiError> {
        self.post("/providers/documents", document).await
    }

    /// Document file upload as `multipart/form-data`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn upload_provider_document(&self, parts: Vec<FormPart>) -> Result<Value, ApiError> {
        self.request("/providers/documents/upload", RequestOptions::multipart(Method::POST, parts))
            .await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_verification_queue(&self, query: &Query) -> Result<Value, ApiError> {
        self.get(&query.apply("/providers/verification-queue")).await
    }

    /// Approve or reject a provider from the verification queue.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn verify_provider_decision(
        &self,
        provider_id: &str,
        action: VerificationAction,
        reason: Option<&str>,
    ) -> Result<Value, ApiError> {
        let body = VerificationDecision { action, reason };
        self.post(&format!("/providers/{}/verify", path_segment(provider_id)), &body).await
    }
}
