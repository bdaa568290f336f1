use super::*;
use crate::config::AppProfile;
use crate::net::transport::{Method, RequestBody};
use crate::net::types::UserType;
use crate::test_helpers::{self, BASE_URL, harness};

#[test]
fn revenue_analytics_path_includes_days() {
    assert_eq!(revenue_analytics_path(30), "/admin/analytics/revenue?days=30");
}

#[test]
fn export_report_path_appends_filters() {
    let query = Query::new().with("from", "2025-01-01").with("format", "csv");
    assert_eq!(
        export_report_path("bookings", &query),
        "/admin/reports/export/bookings?from=2025-01-01&format=csv"
    );
    assert_eq!(export_report_path("revenue", &Query::new()), "/admin/reports/export/revenue");
}

#[tokio::test]
async fn get_users_forwards_filters() {
    let h = harness(AppProfile::Admin, "/users");
    h.api.session().set("admin-tok", &test_helpers::user(UserType::Admin)).unwrap();
    h.transport.push_json(200, serde_json::json!({ "users": [], "total": 0 }));

    let query = Query::new().with("user_type", "service_provider").with("page", 2);
    h.api.get_users(&query).await.unwrap();

    let sent = h.transport.last_request();
    assert_eq!(sent.url, format!("{BASE_URL}/admin/users?user_type=service_provider&page=2"));
    assert_eq!(sent.header("authorization"), Some("Bearer admin-tok"));
}

#[tokio::test]
async fn update_provider_verification_puts_body() {
    let h = harness(AppProfile::Admin, "/providers");
    h.transport.push_json(200, serde_json::json!({ "message": "updated" }));
    let body = serde_json::json!({ "verification_status": "approved", "notes": "docs ok" });
    h.api.update_provider_verification("p-7", &body).await.unwrap();

    let sent = h.transport.last_request();
    assert_eq!(sent.method, Method::PUT);
    assert_eq!(sent.url, format!("{BASE_URL}/admin/providers/p-7/verification"));
    assert_eq!(sent.body, RequestBody::Json(body));
}

#[tokio::test]
async fn update_admin_booking_status_wraps_status() {
    let h = harness(AppProfile::Admin, "/bookings");
    h.transport.push_json(200, serde_json::json!({}));
    h.api.update_admin_booking_status("b-3", "cancelled").await.unwrap();

    let sent = h.transport.last_request();
    assert_eq!(sent.url, format!("{BASE_URL}/admin/bookings/b-3/status"));
    assert_eq!(sent.body, RequestBody::Json(serde_json::json!({ "status": "cancelled" })));
}

#[tokio::test]
async fn delete_user_uses_delete_without_body() {
    let h = harness(AppProfile::Admin, "/users");
    h.transport.push_raw(204, None, "");
    h.api.delete_user("u-9").await.unwrap();

    let sent = h.transport.last_request();
    assert_eq!(sent.method, Method::DELETE);
    assert_eq!(sent.body, RequestBody::Empty);
}

#[tokio::test]
async fn process_payouts_posts_to_process_endpoint() {
    let h = harness(AppProfile::Admin, "/finance");
    h.transport.push_json(200, serde_json::json!({ "processed": 4 }));
    let result = h.api.process_payouts(&serde_json::json!({ "provider_ids": ["p-1"] })).await.unwrap();

    assert_eq!(result["processed"], 4);
    assert_eq!(h.transport.last_request().url, format!("{BASE_URL}/admin/payouts/process"));
}

#[tokio::test]
async fn ids_are_encoded_as_single_path_segments() {
    let h = harness(AppProfile::Admin, "/users");
    h.transport.push_json(200, serde_json::json!({}));
    h.api.get_user_by_id("7/../settings?x=1").await.unwrap();
    assert_eq!(
        h.transport.last_request().url,
        format!("{BASE_URL}/admin/users/7%2F..%2Fsettings%3Fx%3D1")
    );
}
