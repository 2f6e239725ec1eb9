//! Helpers for driving the API router in tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use super::api_routes;
use crate::state::AppState;

pub(crate) fn app() -> Router {
    api_routes(AppState::memory())
}

pub(crate) struct Reply {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub json: Value,
}

pub(crate) async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_owned());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    Reply { status, set_cookie, json }
}

pub(crate) async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Reply {
    send(app, Method::GET, uri, None, cookie).await
}

/// Sign up and sign in; returns the `Cookie` header value for the session.
pub(crate) async fn signed_in(app: &Router, email: &str, first_name: &str) -> String {
    let account = serde_json::json!({
        "email": email,
        "password": "hunter22",
        "first_name": first_name,
        "last_name": "Tester",
    });
    let reply = send(app, Method::POST, "/api/auth/sign-up", Some(account), None).await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let credentials = serde_json::json!({ "email": email, "password": "hunter22" });
    let reply = send(app, Method::POST, "/api/auth/sign-in", Some(credentials), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    let set_cookie = reply.set_cookie.expect("sign-in sets a cookie");
    set_cookie.split(';').next().unwrap().to_owned()
}
