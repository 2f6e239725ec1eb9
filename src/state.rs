//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. Each
//! record kind is reached through its gateway trait object, so the same
//! router runs over the hosted service or the in-memory backend.

use std::sync::Arc;

use sqlx::PgPool;

use crate::gateway::auth_api::AuthApiClient;
use crate::gateway::memory::MemoryGateway;
use crate::gateway::postgres::PgGateway;
use crate::gateway::{AchievementGateway, ProfileGateway, SessionGateway, WorkoutGateway};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionGateway>,
    pub profiles: Arc<dyn ProfileGateway>,
    pub workouts: Arc<dyn WorkoutGateway>,
    pub achievements: Arc<dyn AchievementGateway>,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    /// Every gateway served by one seeded in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::with_memory(Arc::new(MemoryGateway::new()))
    }

    /// Share a caller-held memory gateway, so tests can inspect it afterwards.
    #[must_use]
    pub fn with_memory(gateway: Arc<MemoryGateway>) -> Self {
        Self {
            sessions: gateway.clone(),
            profiles: gateway.clone(),
            workouts: gateway.clone(),
            achievements: gateway,
            cookie_secure: false,
        }
    }

    /// Sessions through the auth REST API, records through Postgres.
    #[must_use]
    pub fn hosted(pool: PgPool, auth: AuthApiClient, cookie_secure: bool) -> Self {
        let records = Arc::new(PgGateway::new(pool));
        Self {
            sessions: Arc::new(auth),
            profiles: records.clone(),
            workouts: records.clone(),
            achievements: records,
            cookie_secure,
        }
    }
}
