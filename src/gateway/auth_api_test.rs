use super::*;
use crate::config::HttpTimeouts;

const USER_ID: &str = "3f1a9c2e-8b7d-4e6f-9a01-5c2d7e8f9b10";

fn user_json() -> String {
    format!(
        r#"{{"id":"{USER_ID}","email":"ada@example.com","aud":"authenticated",
            "user_metadata":{{"first_name":"Ada","last_name":"Lovelace"}}}}"#
    )
}

#[test]
fn parse_session_reads_token_and_metadata() {
    let json = format!(
        r#"{{"access_token":"tok-123","token_type":"bearer","expires_in":3600,
            "refresh_token":"ref","user":{}}}"#,
        user_json()
    );
    let session = parse_session(&json).unwrap();
    assert_eq!(session.access_token, "tok-123");
    assert_eq!(session.user.id.to_string(), USER_ID);
    assert_eq!(session.user.first_name.as_deref(), Some("Ada"));
    assert_eq!(session.user.last_name.as_deref(), Some("Lovelace"));
}

#[test]
fn parse_user_tolerates_missing_metadata() {
    let json = format!(r#"{{"id":"{USER_ID}","email":null}}"#);
    let user = parse_user(&json).unwrap();
    assert_eq!(user.email, None);
    assert_eq!(user.first_name, None);
}

#[test]
fn parse_rejects_garbage() {
    assert!(matches!(parse_session("<html>"), Err(GatewayError::Parse(_))));
    assert!(matches!(parse_user(r#"{"id":"not-a-uuid"}"#), Err(GatewayError::Parse(_))));
}

#[test]
fn upstream_message_prefers_msg_then_description() {
    assert_eq!(
        upstream_message(r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#)
            .as_deref(),
        Some("Invalid login credentials")
    );
    assert_eq!(
        upstream_message(r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#).as_deref(),
        Some("Email not confirmed")
    );
    assert_eq!(upstream_message("oops"), None);
    assert_eq!(upstream_message(r#"{"msg":"  "}"#), None);
}

#[test]
fn bad_credentials_are_unauthorized() {
    let err = classify_failure(400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#.into());
    assert!(matches!(err, GatewayError::Unauthorized(m) if m == "Invalid login credentials"));

    let err = classify_failure(401, String::new());
    assert!(matches!(err, GatewayError::Unauthorized(_)));
}

#[test]
fn existing_account_is_conflict() {
    let err = classify_failure(422, r#"{"error_code":"user_already_exists","msg":"User already registered"}"#.into());
    assert!(matches!(err, GatewayError::Conflict(m) if m == "User already registered"));
}

#[test]
fn other_failures_keep_status_and_body() {
    let err = classify_failure(422, r#"{"msg":"Password should be at least 6 characters"}"#.into());
    assert!(matches!(err, GatewayError::Upstream { status: 422, ref body } if body.contains("at least 6")));

    let err = classify_failure(503, "unavailable".into());
    assert!(matches!(err, GatewayError::Upstream { status: 503, .. }));
}

#[test]
fn endpoint_joins_base_url() {
    let client = AuthApiClient::new(&AuthApiConfig {
        url: "https://project.example.co".into(),
        api_key: "anon".into(),
        timeouts: HttpTimeouts { request_secs: 5, connect_secs: 2 },
    })
    .unwrap();
    assert_eq!(client.endpoint("user"), "https://project.example.co/auth/v1/user");
}
