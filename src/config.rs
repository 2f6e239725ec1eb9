//! Server configuration parsed from environment variables.
//!
//! `from_env` reads the process environment (after `.env` is loaded in
//! `main`); `from_lookup` takes any key lookup so parsing can be tested
//! without touching process-global state.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_AUTH_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_AUTH_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    Missing { var: &'static str },

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Where record and session operations are served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayBackend {
    /// Hosted auth REST API plus Postgres.
    Hosted,
    /// Process-local seeded data; nothing survives a restart.
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl HttpTimeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthApiConfig {
    /// Base URL of the hosted project, without a trailing slash.
    pub url: String,
    /// Public API key sent as `apikey` on every request.
    pub api_key: String,
    pub timeouts: HttpTimeouts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub auth: AuthApiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub backend: GatewayBackend,
    /// Present exactly when `backend` is `Hosted`.
    pub hosted: Option<HostedConfig>,
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// Required for the hosted backend:
    /// - `DATABASE_URL`
    /// - `AUTH_API_URL`, `AUTH_API_KEY`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `GATEWAY_BACKEND`: `hosted` (default) or `memory`
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: default 30
    /// - `AUTH_CONNECT_TIMEOUT_SECS`: default 10
    /// - `COOKIE_SECURE`: defaults to whether `AUTH_API_URL` is https
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let backend = parse_backend(get("GATEWAY_BACKEND"))?;
        let cookie_override = match get("COOKIE_SECURE") {
            Some(raw) => Some(parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?),
            None => None,
        };

        let hosted = match backend {
            GatewayBackend::Memory => None,
            GatewayBackend::Hosted => {
                let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing { var: "DATABASE_URL" })?;
                let url = get("AUTH_API_URL")
                    .ok_or(ConfigError::Missing { var: "AUTH_API_URL" })?
                    .trim_end_matches('/')
                    .to_owned();
                let api_key = get("AUTH_API_KEY").ok_or(ConfigError::Missing { var: "AUTH_API_KEY" })?;
                Some(HostedConfig {
                    database_url,
                    db_max_connections: parse_or(
                        "DB_MAX_CONNECTIONS",
                        get("DB_MAX_CONNECTIONS"),
                        DEFAULT_DB_MAX_CONNECTIONS,
                    )?,
                    auth: AuthApiConfig {
                        url,
                        api_key,
                        timeouts: HttpTimeouts {
                            request_secs: parse_or(
                                "AUTH_REQUEST_TIMEOUT_SECS",
                                get("AUTH_REQUEST_TIMEOUT_SECS"),
                                DEFAULT_AUTH_REQUEST_TIMEOUT_SECS,
                            )?,
                            connect_secs: parse_or(
                                "AUTH_CONNECT_TIMEOUT_SECS",
                                get("AUTH_CONNECT_TIMEOUT_SECS"),
                                DEFAULT_AUTH_CONNECT_TIMEOUT_SECS,
                            )?,
                        },
                    },
                })
            }
        };

        let cookie_secure = cookie_override
            .unwrap_or_else(|| hosted.as_ref().is_some_and(|h| h.auth.url.starts_with("https://")));

        Ok(Self { port, backend, hosted, cookie_secure })
    }
}

/// Accepts the usual on/off spellings, case-insensitively.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_backend(raw: Option<String>) -> Result<GatewayBackend, ConfigError> {
    let Some(value) = raw else {
        return Ok(GatewayBackend::Hosted);
    };
    match value.to_ascii_lowercase().as_str() {
        "hosted" => Ok(GatewayBackend::Hosted),
        "memory" => Ok(GatewayBackend::Memory),
        _ => Err(ConfigError::Invalid { var: "GATEWAY_BACKEND", value }),
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse::<T>().map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
