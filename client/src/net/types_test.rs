use super::*;

fn backend_user() -> Value {
    serde_json::json!({
        "id": "8d0c6d1e-3f7a-4f0e-9a52-0c1b7f0e6a11",
        "email": "sara@example.com",
        "phone": "+966501234567",
        "user_type": "service_provider",
        "status": "active",
        "is_active": true,
        "is_verified": false,
        "created_at": "2025-06-01T10:00:00",
        "last_login_at": null
    })
}

// =============================================================================
// UserType
// =============================================================================

#[test]
fn user_type_wire_names() {
    assert_eq!(UserType::Customer.as_str(), "customer");
    assert_eq!(UserType::ServiceProvider.as_str(), "service_provider");
    assert_eq!(UserType::Admin.to_string(), "admin");
}

#[test]
fn user_type_from_str_accepts_wire_names_only() {
    assert_eq!("admin".parse::<UserType>(), Ok(UserType::Admin));
    assert_eq!(" customer ".parse::<UserType>(), Ok(UserType::Customer));
    assert!("ADMIN".parse::<UserType>().is_err());
    assert!("superuser".parse::<UserType>().is_err());
}

// =============================================================================
// User
// =============================================================================

#[test]
fn user_parses_backend_record_and_keeps_extra_fields() {
    let user: User = serde_json::from_value(backend_user()).unwrap();
    assert_eq!(user.user_type, UserType::ServiceProvider);
    assert_eq!(user.email.as_deref(), Some("sara@example.com"));
    assert_eq!(user.extra.get("is_verified"), Some(&Value::Bool(false)));
    assert!(user.extra.contains_key("last_login_at"));
    assert!(!user.is_admin());
}

#[test]
fn user_serializes_back_to_equivalent_json() {
    let user: User = serde_json::from_value(backend_user()).unwrap();
    let reparsed: User = serde_json::from_str(&serde_json::to_string(&user).unwrap()).unwrap();
    assert_eq!(reparsed, user);
}

#[test]
fn user_numeric_id_is_normalized() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 1,
        "email": "admin@example.com",
        "user_type": "admin"
    }))
    .unwrap();
    assert_eq!(user.id, "1");
    assert_eq!(user.status, "active");
    assert!(user.is_admin());
}

#[test]
fn user_rejects_unknown_role() {
    let err = serde_json::from_value::<User>(serde_json::json!({
        "id": "u1",
        "user_type": "superuser"
    }));
    assert!(err.is_err());
}

#[test]
fn user_rejects_empty_id() {
    let err = serde_json::from_value::<User>(serde_json::json!({
        "id": "",
        "user_type": "customer"
    }));
    assert!(err.is_err());
}

#[test]
fn display_identity_prefers_email_then_phone() {
    let mut user: User = serde_json::from_value(backend_user()).unwrap();
    assert_eq!(user.display_identity(), "sara@example.com");
    user.email = None;
    assert_eq!(user.display_identity(), "+966501234567");
    user.phone = None;
    assert_eq!(user.display_identity(), "8d0c6d1e-3f7a-4f0e-9a52-0c1b7f0e6a11");
}

// =============================================================================
// Auth payloads
// =============================================================================

#[test]
fn login_response_parses_full_payload() {
    let resp: LoginResponse = serde_json::from_value(serde_json::json!({
        "message": "Login successful",
        "user": backend_user(),
        "profile": { "business_name": "Sara Fixes" },
        "access_token": "jwt-abc",
        "refresh_token": "jwt-refresh"
    }))
    .unwrap();
    assert_eq!(resp.access_token.as_deref(), Some("jwt-abc"));
    assert_eq!(resp.message.as_deref(), Some("Login successful"));
    assert!(resp.profile.is_some());
}

#[test]
fn login_response_without_token_still_parses() {
    let resp: LoginResponse = serde_json::from_value(serde_json::json!({ "user": backend_user() })).unwrap();
    assert!(resp.access_token.is_none());
    assert!(resp.profile.is_none());
}

#[test]
fn login_response_requires_user() {
    let err = serde_json::from_value::<LoginResponse>(serde_json::json!({ "access_token": "t" }));
    assert!(err.is_err());
}

#[test]
fn credentials_debug_redacts_password() {
    let creds = LoginCredentials::new("admin@example.com", "hunter2");
    let debug = format!("{creds:?}");
    assert!(debug.contains("admin@example.com"));
    assert!(!debug.contains("hunter2"));
}

#[test]
fn credentials_serialize_with_backend_field_names() {
    let creds = LoginCredentials::new("0501234567", "pw");
    assert_eq!(
        serde_json::to_value(&creds).unwrap(),
        serde_json::json!({ "email_or_phone": "0501234567", "password": "pw" })
    );
}

// =============================================================================
// Provider payloads
// =============================================================================

#[test]
fn online_status_going_online_flattens_position() {
    let position = GeoPosition { latitude: 24.7, longitude: 46.6, accuracy: Some(5.0), heading: None, speed: None };
    let body = serde_json::to_value(OnlineStatusUpdate::new(true, Some(position))).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "is_online": true, "latitude": 24.7, "longitude": 46.6, "accuracy": 5.0 })
    );
}

#[test]
fn online_status_going_offline_drops_position() {
    let position = GeoPosition { latitude: 1.0, longitude: 2.0, ..GeoPosition::default() };
    let body = serde_json::to_value(OnlineStatusUpdate::new(false, Some(position))).unwrap();
    assert_eq!(body, serde_json::json!({ "is_online": false }));
}
