use super::*;
use serde_json::json;

// =============================================================
// User
// =============================================================

#[test]
fn user_deserializes_backend_profile() {
    let user: User = serde_json::from_value(json!({
        "id": "u-1",
        "username": "alice",
        "email": "alice@example.com"
    }))
    .unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert!(user.extra.is_empty());
}

#[test]
fn user_missing_fields_default_to_empty() {
    let user: User = serde_json::from_value(json!({ "nickname": "al" })).unwrap();
    assert_eq!(user.id, "");
    assert_eq!(user.username, "");
    assert_eq!(user.extra.get("nickname"), Some(&json!("al")));
}

#[test]
fn user_serialization_keeps_extra_fields_at_top_level() {
    let user: User = serde_json::from_value(json!({
        "id": "u-2",
        "username": "bob",
        "email": "bob@example.com",
        "avatar": "https://example.com/b.png"
    }))
    .unwrap();
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["avatar"], json!("https://example.com/b.png"));
    assert!(value.get("extra").is_none());
}

// =============================================================
// Login response
// =============================================================

#[test]
fn login_response_reads_token_and_user_id() {
    let resp: LoginResponse = serde_json::from_value(json!({
        "access_token": "T1",
        "token_type": "bearer",
        "user_id": "u-1"
    }))
    .unwrap();
    assert_eq!(resp.access_token.as_deref(), Some("T1"));
    assert_eq!(resp.token_type.as_deref(), Some("bearer"));
    assert_eq!(resp.user_id.as_deref(), Some("u-1"));
}

#[test]
fn login_response_tolerates_missing_fields() {
    let resp: LoginResponse = serde_json::from_value(json!({})).unwrap();
    assert_eq!(resp, LoginResponse::default());
}

#[test]
fn credentials_serialize_as_flat_object() {
    let creds = Credentials { username: "a".to_owned(), password: "b".to_owned() };
    assert_eq!(serde_json::to_value(&creds).unwrap(), json!({ "username": "a", "password": "b" }));
}
