use super::*;
use crate::net::mock::MockTransport;
use futures::executor::block_on;
use serde_json::json;

// =============================================================
// Error detail extraction
// =============================================================

#[test]
fn error_detail_reads_string_detail() {
    assert_eq!(error_detail(r#"{"detail":"bad credentials"}"#).as_deref(), Some("bad credentials"));
}

#[test]
fn error_detail_ignores_structured_detail() {
    assert_eq!(error_detail(r#"{"detail":[{"loc":["body","username"],"msg":"field required"}]}"#), None);
}

#[test]
fn error_detail_ignores_non_json_and_blank() {
    assert_eq!(error_detail("<html>502</html>"), None);
    assert_eq!(error_detail(r#"{"detail":"  "}"#), None);
    assert_eq!(error_detail(r#"{"message":"nope"}"#), None);
}

#[test]
fn user_message_prefers_detail_then_fallback() {
    let with_detail = ApiError::Status { status: 400, detail: Some("bad credentials".to_owned()) };
    let without = ApiError::Status { status: 500, detail: None };
    let transport = ApiError::Transport("offline".to_owned());
    assert_eq!(with_detail.user_message("Login failed"), "bad credentials");
    assert_eq!(without.user_message("Login failed"), "Login failed");
    assert_eq!(transport.user_message("Login failed"), "Login failed");
}

#[test]
fn bearer_formats_authorization_value() {
    assert_eq!(bearer("abc"), "Bearer abc");
}

// =============================================================
// Default headers
// =============================================================

#[test]
fn default_headers_are_sent_with_every_request() {
    let transport = MockTransport::new();
    transport.respond(200, json!({})).respond(200, json!({}));
    let client = ApiClient::new(transport.clone());
    client.set_default_header(AUTHORIZATION, "Bearer T1");

    let _: serde_json::Value = block_on(client.get_json("/api/users/me")).unwrap();
    let _: serde_json::Value = block_on(client.post_json("/api/register", &json!({}))).unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.header("authorization") == Some("Bearer T1")));
}

#[test]
fn removed_default_header_is_not_sent() {
    let transport = MockTransport::new();
    transport.respond(200, json!({}));
    let client = ApiClient::new(transport.clone());
    client.set_default_header(AUTHORIZATION, "Bearer T1");
    client.remove_default_header(AUTHORIZATION);

    let _: serde_json::Value = block_on(client.get_json("/api/users/me")).unwrap();

    assert_eq!(transport.requests()[0].header(AUTHORIZATION), None);
    assert_eq!(client.default_header(AUTHORIZATION), None);
}

// =============================================================
// Request/response mapping
// =============================================================

#[test]
fn post_json_sends_method_url_and_body() {
    let transport = MockTransport::new();
    transport.respond(200, json!({ "ok": true }));
    let client = ApiClient::new(transport.clone());

    let resp: serde_json::Value = block_on(client.post_json("/api/login", &json!({ "username": "a" }))).unwrap();

    assert_eq!(resp, json!({ "ok": true }));
    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "/api/login");
    assert_eq!(request.body, Some(json!({ "username": "a" })));
    assert_eq!(request.header("content-type"), Some("application/json"));
}

#[test]
fn get_json_sends_no_body() {
    let transport = MockTransport::new();
    transport.respond(200, json!({}));
    let client = ApiClient::new(transport.clone());

    let _: serde_json::Value = block_on(client.get_json("/api/users/me")).unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.body, None);
    assert_eq!(request.header("content-type"), None);
}

#[test]
fn non_success_status_maps_to_status_error_with_detail() {
    let transport = MockTransport::new();
    transport.respond(401, json!({ "detail": "expired" }));
    let client = ApiClient::new(transport);

    let err = block_on(client.get_json::<serde_json::Value>("/api/users/me")).unwrap_err();

    assert_eq!(err, ApiError::Status { status: 401, detail: Some("expired".to_owned()) });
}

#[test]
fn undecodable_body_maps_to_decode_error() {
    let transport = MockTransport::new();
    transport.respond_raw(200, "not json");
    let client = ApiClient::new(transport);

    let err = block_on(client.get_json::<serde_json::Value>("/api/users/me")).unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn unencodable_body_is_an_encode_error_and_sends_nothing() {
    let transport = MockTransport::new();
    let client = ApiClient::new(transport.clone());
    let body = std::collections::BTreeMap::from([((1, 2), "tuple keys are not JSON object keys")]);

    let err = block_on(client.post_json::<_, serde_json::Value>("/api/register", &body)).unwrap_err();

    assert!(matches!(err, ApiError::Encode(_)));
    assert!(err.to_string().starts_with("failed to encode request body"));
    assert!(transport.requests().is_empty());
}

#[test]
fn transport_failure_is_passed_through() {
    let transport = MockTransport::new();
    transport.fail("connection refused");
    let client = ApiClient::new(transport);

    let err = block_on(client.get_json::<serde_json::Value>("/api/users/me")).unwrap_err();

    assert_eq!(err, ApiError::Transport("connection refused".to_owned()));
}

#[cfg(not(feature = "csr"))]
#[test]
fn browser_transport_fails_outside_the_browser() {
    let client = ApiClient::new(BrowserTransport);
    let err = block_on(client.get_json::<serde_json::Value>("/api/users/me")).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
