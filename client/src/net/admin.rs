//! Admin endpoints: dashboard, users, provider verification, bookings,
//! catalogue, analytics, settings, notifications and finance.
//!
//! Every call here needs an admin bearer token; a 401 takes the global
//! session-expired path in [`ApiClient::request`].

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use serde::Serialize;
use serde_json::Value;

use super::api::ApiClient;
use super::error::ApiError;
use super::query::{Query, path_segment};

fn revenue_analytics_path(days: u32) -> String {
    Query::new().with("days", days).apply("/admin/analytics/revenue")
}

fn export_report_path(report_type: &str, query: &Query) -> String {
    query.apply(&format!("/admin/reports/export/{}", path_segment(report_type)))
}

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

impl ApiClient {
    // =========================================================================
    // DASHBOARD
    // =========================================================================

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_dashboard_stats(&self) -> Result<Value, ApiError> {
        self.get("/admin/dashboard/stats").await
    }

    // =========================================================================
    // USERS
    // =========================================================================

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_users(&self, query: &Query) -> Result<Value, ApiError> {
        self.get(&query.apply("/admin/users")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_user_by_id(&self, user_id: &str) -> Result<Value, ApiError> {
        self.get(&format!("/admin/users/{}", path_segment(user_id))).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_user<B: Serialize + ?Sized>(&self, user_id: &str, data: &B) -> Result<Value, ApiError> {
        self.put(&format!("/admin/users/{}", path_segment(user_id)), data).await
    }

    /// Activate or suspend an account.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_user_status<B: Serialize + ?Sized>(&self, user_id: &str, data: &B) -> Result<Value, ApiError> {
        self.put(&format!("/admin/users/{}/status", path_segment(user_id)), data).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn delete_user(&self, user_id: &str) -> Result<Value, ApiError> {
        self.delete(&format!("/admin/users/{}", path_segment(user_id))).await
    }

    // =========================================================================
    // PROVIDERS
    // =========================================================================

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_providers(&self, query: &Query) -> Result<Value, ApiError> {
        self.get(&query.apply("/admin/providers")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_provider_by_id(&self, provider_id: &str) -> Result<Value, ApiError> {
        self.get(&format!("/admin/providers/{}", path_segment(provider_id))).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn verify_provider<B: Serialize + ?Sized>(&self, provider_id: &str, data: &B) -> Result<Value, ApiError> {
        self.post(&format!("/admin/providers/{}/verify", path_segment(provider_id)), data).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn reject_provider<B: Serialize + ?Sized>(&self, provider_id: &str, data: &B) -> Result<Value, ApiError> {
        self.post(&format!("/admin/providers/{}/reject", path_segment(provider_id)), data).await
    }

    /// Set a provider's verification status in one call.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_provider_verification<B: Serialize + ?Sized>(
        &self,
        provider_id: &str,
        data: &B,
    ) -> Result<Value, ApiError> {
        self.put(&format!("/admin/providers/{}/verification", path_segment(provider_id)), data).await
    }

    // =========================================================================
    // BOOKINGS
    // =========================================================================

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_all_bookings(&self, query: &Query) -> Result<Value, ApiError> {
        self.get(&query.apply("/admin/bookings")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_booking_by_id(&self, booking_id: &str) -> Result<Value, ApiError> {
        self.get(&format!("/admin/bookings/{}", path_segment(booking_id))).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_admin_booking_status(&self, booking_id: &str, status: &str) -> Result<Value, ApiError> {
        self.put(&format!("/admin/bookings/{}/status", path_segment(booking_id)), &StatusBody { status }).await
    }

    // =========================================================================
    // CATALOGUE
    // =========================================================================

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_admin_services(&self, query: &Query) -> Result<Value, ApiError> {
        self.get(&query.apply("/admin/services")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn create_admin_service<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value, ApiError> {
        self.post("/admin/services", data).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_admin_service<B: Serialize + ?Sized>(&self, service_id: &str, data: &B) -> Result<Value, ApiError> {
        self.put(&format!("/admin/services/{}", path_segment(service_id)), data).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn delete_admin_service(&self, service_id: &str) -> Result<Value, ApiError> {
        self.delete(&format!("/admin/services/{}", path_segment(service_id))).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn create_service_category<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value, ApiError> {
        self.post("/admin/services/categories", data).await
    }

    // =========================================================================
    // ANALYTICS & REPORTS
    // =========================================================================

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_analytics(&self, query: &Query) -> Result<Value, ApiError> {
        self.get(&query.apply("/admin/analytics")).await
    }

    /// Revenue series over the trailing `days` days.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_revenue_analytics(&self, days: u32) -> Result<Value, ApiError> {
        self.get(&revenue_analytics_path(days)).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_reports(&self, query: &Query) -> Result<Value, ApiError> {
        self.get(&query.apply("/admin/reports")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn export_report(&self, report_type: &str, query: &Query) -> Result<Value, ApiError> {
        self.get(&export_report_path(report_type, query)).await
    }

    // =========================================================================
    // SETTINGS & NOTIFICATIONS
    // =========================================================================

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_settings(&self) -> Result<Value, ApiError> {
        self.get("/admin/settings").await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn update_settings<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value, ApiError> {
        self.put("/admin/settings", data).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_system_settings(&self) -> Result<Value, ApiError> {
        self.get("/admin/system/settings").await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_notifications(&self, query: &Query) -> Result<Value, ApiError> {
        self.get(&query.apply("/admin/notifications")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn send_notification<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value, ApiError> {
        self.post("/admin/notifications/send", data).await
    }

    // =========================================================================
    // FINANCE
    // =========================================================================

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_transactions(&self, query: &Query) -> Result<Value, ApiError> {
        self.get(&query.apply("/admin/transactions")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_revenue(&self, query: &Query) -> Result<Value, ApiError> {
        self.get(&query.apply("/admin/revenue")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn get_payouts(&self, query: &Query) -> Result<Value, ApiError> {
        self.get(&query.apply("/admin/payouts")).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn process_payouts<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value, ApiError> {
        self.post("/admin/payouts/process", data).await
    }
}
