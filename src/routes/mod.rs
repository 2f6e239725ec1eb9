//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON API routes and Leptos SSR share a single Axum router. Handlers reach
//! records only through the gateways in `AppState`; every failure leaves as
//! `{"error": message}` with a matching status code.

pub mod achievements;
pub mod auth;
pub mod profile;
pub mod workouts;

use std::path::PathBuf;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::gateway::GatewayError;
use crate::gateway::auth_api::upstream_message;
use crate::state::AppState;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Gateway(GatewayError),
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self::Gateway(err)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Gateway(GatewayError::NotFound) => (StatusCode::NOT_FOUND, "Not found".into()),
            Self::Gateway(GatewayError::Unauthorized(msg)) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::Gateway(GatewayError::Conflict(msg)) => (StatusCode::CONFLICT, msg.clone()),
            Self::Gateway(GatewayError::Upstream { status, body }) if (400..500).contains(status) => (
                StatusCode::BAD_REQUEST,
                upstream_message(body).unwrap_or_else(|| "Request rejected".into()),
            ),
            Self::Gateway(GatewayError::Upstream { .. } | GatewayError::Request(_) | GatewayError::Parse(_)) => {
                (StatusCode::BAD_GATEWAY, "Service unavailable, please try again".into())
            }
            Self::Gateway(GatewayError::Db(_)) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = ?self, %status, "request failed");
        } else {
            tracing::debug!(error = ?self, %status, "request rejected");
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// ROUTER
// =============================================================================

/// JSON API routes.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/sign-up", post(auth::sign_up))
        .route("/api/auth/sign-in", post(auth::sign_in))
        .route("/api/auth/sign-out", post(auth::sign_out))
        .route("/api/auth/me", get(auth::me))
        .route("/api/workouts", get(workouts::list))
        .route("/api/workouts/{id}", get(workouts::get_one))
        .route("/api/workouts/{id}/complete", post(achievements::complete))
        .route("/api/categories", get(workouts::categories))
        .route("/api/profile", get(profile::get_profile).patch(profile::update_profile))
        .route("/api/achievements/me", get(achievements::mine))
        .route("/api/leaderboard", get(achievements::leaderboard))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes plus Leptos SSR and the compiled client assets under `/pkg`.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "support_test.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
