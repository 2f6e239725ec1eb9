//! Auth routes: sign-up, sign-in, sign-out, current identity.
//!
//! The hosted access token never reaches page script. It lives in the
//! http-only `session_token` cookie and is resolved per request by
//! [`AuthUser`].

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::{ApiError, ApiResult};
use crate::gateway::GatewayError;
use crate::gateway::types::{Credentials, NewAccount, SessionUser};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";
const MIN_PASSWORD_LEN: usize = 6;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Signed-in user resolved from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: SessionUser,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(GatewayError::Unauthorized("Sign in required".into()).into());
        }

        let app_state = AppState::from_ref(state);
        let user = app_state.sessions.current_user(token).await?;
        Ok(Self { user })
    }
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

fn cleared_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// VALIDATION
// =============================================================================

pub(crate) fn validate_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required".into()));
    }
    Ok(())
}

pub(crate) fn validate_account(account: &NewAccount) -> Result<(), ApiError> {
    validate_credentials(&account.email, &account.password)?;
    if !account.email.contains('@') {
        return Err(ApiError::BadRequest("Please enter a valid email address".into()));
    }
    if account.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!("Password must be at least {MIN_PASSWORD_LEN} characters")));
    }
    if account.first_name.trim().is_empty() || account.last_name.trim().is_empty() {
        return Err(ApiError::BadRequest("First and last name are required".into()));
    }
    Ok(())
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/sign-up`: create an account. The user signs in separately.
pub async fn sign_up(State(state): State<AppState>, Json(account): Json<NewAccount>) -> ApiResult<StatusCode> {
    validate_account(&account)?;
    state.sessions.sign_up(&account).await?;
    Ok(StatusCode::CREATED)
}

/// `POST /api/auth/sign-in`: set the session cookie and return the user.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Response> {
    validate_credentials(&credentials.email, &credentials.password)?;
    let session = state.sessions.sign_in(&credentials).await?;
    tracing::info!(user_id = %session.user.id, "signed in");

    let jar = jar.add(session_cookie(session.access_token, state.cookie_secure));
    Ok((jar, Json(session.user)).into_response())
}

/// `POST /api/auth/sign-out`: end the hosted session if any, always clear the cookie.
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = jar.get(COOKIE_NAME).map(|c| c.value().to_owned()).filter(|t| !t.is_empty()) {
        if let Err(e) = state.sessions.sign_out(&token).await {
            tracing::warn!(error = %e, "hosted sign-out failed");
        }
    }

    (jar.add(cleared_cookie(state.cookie_secure)), StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.user)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
