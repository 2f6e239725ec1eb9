use std::collections::HashMap;

use super::*;

fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let env: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    AppConfig::from_lookup(|key| env.get(key).cloned())
}

const HOSTED: &[(&str, &str)] = &[
    ("DATABASE_URL", "postgres://localhost/gentle"),
    ("AUTH_API_URL", "https://project.example.co/"),
    ("AUTH_API_KEY", "anon-key"),
];

#[test]
fn hosted_defaults() {
    let cfg = config(HOSTED).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend, GatewayBackend::Hosted);
    let hosted = cfg.hosted.unwrap();
    assert_eq!(hosted.database_url, "postgres://localhost/gentle");
    assert_eq!(hosted.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    assert_eq!(hosted.auth.url, "https://project.example.co");
    assert_eq!(
        hosted.auth.timeouts,
        HttpTimeouts {
            request_secs: DEFAULT_AUTH_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_AUTH_CONNECT_TIMEOUT_SECS
        }
    );
    assert!(cfg.cookie_secure, "https auth url implies secure cookies");
}

#[test]
fn hosted_overrides() {
    let mut pairs = HOSTED.to_vec();
    pairs.extend([
        ("PORT", "8080"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("AUTH_REQUEST_TIMEOUT_SECS", "42"),
        ("AUTH_CONNECT_TIMEOUT_SECS", "7"),
        ("COOKIE_SECURE", "off"),
    ]);
    let cfg = config(&pairs).unwrap();
    assert_eq!(cfg.port, 8080);
    assert!(!cfg.cookie_secure);
    let hosted = cfg.hosted.unwrap();
    assert_eq!(hosted.db_max_connections, 12);
    assert_eq!(hosted.auth.timeouts, HttpTimeouts { request_secs: 42, connect_secs: 7 });
    assert_eq!(hosted.auth.timeouts.request(), Duration::from_secs(42));
}

#[test]
fn hosted_requires_database_and_auth() {
    assert_eq!(config(&[]).unwrap_err(), ConfigError::Missing { var: "DATABASE_URL" });
    assert_eq!(
        config(&[("DATABASE_URL", "postgres://x")]).unwrap_err(),
        ConfigError::Missing { var: "AUTH_API_URL" }
    );
    assert_eq!(
        config(&[("DATABASE_URL", "postgres://x"), ("AUTH_API_URL", "http://x")]).unwrap_err(),
        ConfigError::Missing { var: "AUTH_API_KEY" }
    );
}

#[test]
fn memory_backend_needs_nothing_else() {
    let cfg = config(&[("GATEWAY_BACKEND", "Memory")]).unwrap();
    assert_eq!(cfg.backend, GatewayBackend::Memory);
    assert_eq!(cfg.hosted, None);
    assert!(!cfg.cookie_secure);
}

#[test]
fn blank_values_count_as_unset() {
    let cfg = config(&[("GATEWAY_BACKEND", "memory"), ("PORT", "  ")]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
}

#[test]
fn invalid_values_are_reported() {
    assert_eq!(
        config(&[("GATEWAY_BACKEND", "sqlite")]).unwrap_err(),
        ConfigError::Invalid { var: "GATEWAY_BACKEND", value: "sqlite".to_owned() }
    );
    assert_eq!(
        config(&[("GATEWAY_BACKEND", "memory"), ("PORT", "http")]).unwrap_err(),
        ConfigError::Invalid { var: "PORT", value: "http".to_owned() }
    );
    assert_eq!(
        config(&[("GATEWAY_BACKEND", "memory"), ("COOKIE_SECURE", "maybe")]).unwrap_err(),
        ConfigError::Invalid { var: "COOKIE_SECURE", value: "maybe".to_owned() }
    );
}

#[test]
fn parse_bool_variants() {
    for raw in ["1", "true", "YES", " on "] {
        assert_eq!(parse_bool(raw), Some(true), "{raw:?}");
    }
    for raw in ["0", "False", "no", "OFF"] {
        assert_eq!(parse_bool(raw), Some(false), "{raw:?}");
    }
    assert_eq!(parse_bool(""), None);
}
