//! Hosted auth REST API client.
//!
//! Thin HTTP wrapper for the `/auth/v1` endpoints. Response parsing and
//! status classification are pure functions for testability.

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use super::types::{Credentials, NewAccount, Session, SessionUser};
use super::{GatewayError, SessionGateway};
use crate::config::AuthApiConfig;

// =============================================================================
// CLIENT
// =============================================================================

pub struct AuthApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AuthApiClient {
    /// # Errors
    ///
    /// Returns `GatewayError::Request` if the HTTP client cannot be built.
    pub fn new(config: &AuthApiConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        Ok(Self { http, base_url: config.url.clone(), api_key: config.api_key.clone() })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    /// Send and return `(status, body)` without interpreting either.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), GatewayError> {
        let response = request
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| GatewayError::Request(e.to_string()))?;
        Ok((status, text))
    }
}

#[async_trait]
impl SessionGateway for AuthApiClient {
    async fn sign_up(&self, account: &NewAccount) -> Result<(), GatewayError> {
        let body = serde_json::json!({
            "email": account.email.trim(),
            "password": account.password,
            "data": {
                "first_name": account.first_name.trim(),
                "last_name": account.last_name.trim(),
            },
        });
        let (status, text) = self.send(self.http.post(self.endpoint("signup")).json(&body)).await?;
        if !is_success(status) {
            return Err(classify_failure(status, text));
        }
        tracing::info!(email = %account.email.trim(), "account created");
        Ok(())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, GatewayError> {
        let body = serde_json::json!({
            "email": credentials.email.trim(),
            "password": credentials.password,
        });
        let request = self.http.post(self.endpoint("token")).query(&[("grant_type", "password")]).json(&body);
        let (status, text) = self.send(request).await?;
        if !is_success(status) {
            return Err(classify_failure(status, text));
        }
        parse_session(&text)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), GatewayError> {
        let (status, text) = self.send(self.http.post(self.endpoint("logout")).bearer_auth(access_token)).await?;
        match status {
            // An already-expired token is as signed out as it gets.
            401 | 403 | 404 => Ok(()),
            s if is_success(s) => Ok(()),
            s => Err(classify_failure(s, text)),
        }
    }

    async fn current_user(&self, access_token: &str) -> Result<SessionUser, GatewayError> {
        let (status, text) = self.send(self.http.get(self.endpoint("user")).bearer_auth(access_token)).await?;
        if !is_success(status) {
            return Err(classify_failure(status, text));
        }
        parse_user(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: UserResponse,
}

#[derive(Deserialize)]
struct UserResponse {
    id: Uuid,
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Deserialize, Default)]
struct UserMetadata {
    first_name: Option<String>,
    last_name: Option<String>,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    error: Option<String>,
    error_code: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl From<UserResponse> for SessionUser {
    fn from(user: UserResponse) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.user_metadata.first_name,
            last_name: user.user_metadata.last_name,
        }
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

pub(crate) fn parse_session(json: &str) -> Result<Session, GatewayError> {
    let token: TokenResponse = serde_json::from_str(json).map_err(|e| GatewayError::Parse(e.to_string()))?;
    Ok(Session { access_token: token.access_token, user: token.user.into() })
}

pub(crate) fn parse_user(json: &str) -> Result<SessionUser, GatewayError> {
    let user: UserResponse = serde_json::from_str(json).map_err(|e| GatewayError::Parse(e.to_string()))?;
    Ok(user.into())
}

/// Human-readable message from an error body, if it carries one.
pub(crate) fn upstream_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .msg
        .or(parsed.error_description)
        .or(parsed.message)
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}

/// Map a non-2xx response to the gateway error the routes understand.
pub(crate) fn classify_failure(status: u16, body: String) -> GatewayError {
    let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
    let code = parsed.error_code.as_deref().or(parsed.error.as_deref()).unwrap_or_default();
    let message = upstream_message(&body);

    match (status, code) {
        (_, "invalid_grant" | "invalid_credentials") | (401 | 403, _) => {
            GatewayError::Unauthorized(message.unwrap_or_else(|| "Invalid login credentials".into()))
        }
        (_, "user_already_exists" | "email_exists") | (409, _) => {
            GatewayError::Conflict(message.unwrap_or_else(|| "User already registered".into()))
        }
        _ => {
            tracing::warn!(status, body = %body, "auth api request failed");
            GatewayError::Upstream { status, body }
        }
    }
}

#[cfg(test)]
#[path = "auth_api_test.rs"]
mod tests;
