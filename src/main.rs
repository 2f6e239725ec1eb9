#![recursion_limit = "256"]

mod config;
mod db;
mod gateway;
mod routes;
mod state;

use config::{AppConfig, GatewayBackend};
use gateway::auth_api::AuthApiClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env is normal outside local development.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().expect("invalid configuration");

    let state = match (config.backend, &config.hosted) {
        (GatewayBackend::Hosted, Some(hosted)) => {
            let pool = db::init_pool(&hosted.database_url, hosted.db_max_connections)
                .await
                .expect("database init failed");
            let auth = AuthApiClient::new(&hosted.auth).expect("auth client init failed");
            tracing::info!(auth_url = %hosted.auth.url, "using hosted backend");
            state::AppState::hosted(pool, auth, config.cookie_secure)
        }
        _ => {
            tracing::warn!("using in-memory backend; data is lost on restart");
            state::AppState { cookie_secure: config.cookie_secure, ..state::AppState::memory() }
        }
    };

    let app = routes::leptos_app(state).expect("leptos configuration failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "gentle-motion listening");
    axum::serve(listener, app).await.expect("server failed");
}
