//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result<_, String>` outputs instead of panics so a
//! failed fetch degrades the page instead of crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{Achievement, LeaderboardEntry, Profile, ProfileUpdate, SignInRequest, SignUpRequest, User, Workout, WorkoutCategory};

/// Filters for the workout catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkoutFilter {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub limit: Option<u32>,
    pub order: Option<String>,
}

#[cfg(any(test, feature = "hydrate"))]
fn workouts_endpoint(filter: &WorkoutFilter) -> String {
    let mut params = Vec::new();
    if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
        params.push(format!("category={}", encode_query_value(category)));
    }
    if let Some(difficulty) = filter.difficulty.as_deref().filter(|d| !d.is_empty()) {
        params.push(format!("difficulty={}", encode_query_value(difficulty)));
    }
    if let Some(limit) = filter.limit {
        params.push(format!("limit={limit}"));
    }
    if let Some(order) = filter.order.as_deref().filter(|o| !o.is_empty()) {
        params.push(format!("order={}", encode_query_value(order)));
    }
    if params.is_empty() {
        "/api/workouts".to_owned()
    } else {
        format!("/api/workouts?{}", params.join("&"))
    }
}

/// Percent-encode everything outside the unreserved set.
#[cfg(any(test, feature = "hydrate"))]
fn encode_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(any(test, feature = "hydrate"))]
fn workout_endpoint(id: &str) -> String {
    format!("/api/workouts/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn complete_endpoint(id: &str) -> String {
    format!("/api/workouts/{id}/complete")
}

#[cfg(any(test, feature = "hydrate"))]
fn failure_message(action: &str, status: u16, body: Option<&str>) -> String {
    let detail = body
        .and_then(|b| serde_json::from_str::<super::types::ApiError>(b).ok())
        .map(|e| e.error);
    match detail {
        Some(detail) if !detail.is_empty() => detail,
        _ => format!("{action} failed: {status}"),
    }
}

#[cfg(feature = "hydrate")]
async fn read_failure(action: &str, resp: gloo_net::http::Response) -> String {
    let status = resp.status();
    let body = resp.text().await.ok();
    failure_message(action, status, body.as_deref())
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Option<T> {
    let resp = gloo_net::http::Request::get(url).send().await.ok()?;
    if !resp.ok() {
        log::debug!("GET {url} -> {}", resp.status());
        return None;
    }
    resp.json::<T>().await.ok()
}

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/auth/me").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Password sign-in via `POST /api/auth/sign-in`.
///
/// # Errors
///
/// Returns the server's error message, or a status summary.
pub async fn sign_in(request: &SignInRequest) -> Result<User, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/sign-in")
            .json(request)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(read_failure("sign in", resp).await);
        }
        resp.json::<User>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}

/// Account creation via `POST /api/auth/sign-up`.
///
/// # Errors
///
/// Returns the server's error message, or a status summary.
pub async fn sign_up(request: &SignUpRequest) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/sign-up")
            .json(request)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(read_failure("sign up", resp).await);
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}

/// End the session via `POST /api/auth/sign-out`.
pub async fn sign_out() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/sign-out").send().await;
    }
}

pub async fn fetch_workouts(filter: &WorkoutFilter) -> Option<Vec<Workout>> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&workouts_endpoint(filter)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = filter;
        None
    }
}

pub async fn fetch_workout(id: &str) -> Option<Workout> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&workout_endpoint(id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        None
    }
}

pub async fn fetch_categories() -> Option<Vec<WorkoutCategory>> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/categories").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Record a completed workout and return the updated achievement row.
///
/// # Errors
///
/// Returns the server's error message, or a status summary.
pub async fn complete_workout(id: &str) -> Result<Achievement, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&complete_endpoint(id))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(read_failure("complete workout", resp).await);
        }
        resp.json::<Achievement>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err("not available on server".to_owned())
    }
}

pub async fn fetch_profile() -> Option<Profile> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/profile").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Save name and age via `PATCH /api/profile`.
///
/// # Errors
///
/// Returns the server's error message, or a status summary.
pub async fn update_profile(update: &ProfileUpdate) -> Result<Profile, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::patch("/api/profile")
            .json(update)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(read_failure("update profile", resp).await);
        }
        resp.json::<Profile>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = update;
        Err("not available on server".to_owned())
    }
}

pub async fn fetch_my_achievements() -> Option<Achievement> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/achievements/me").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

pub async fn fetch_leaderboard() -> Option<Vec<LeaderboardEntry>> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/leaderboard").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}
