//! Gateways over the hosted data service.
//!
//! DESIGN
//! ======
//! One trait per record kind, each implemented against the hosted service
//! (`auth_api` for sessions, `postgres` for tables) and once in memory for
//! tests and local runs. Routes only see `Arc<dyn ...Gateway>` in `AppState`.

pub mod auth_api;
pub mod memory;
pub mod postgres;
pub mod progress;
pub mod types;

use async_trait::async_trait;
use uuid::Uuid;

use types::{
    Achievement, Credentials, LeaderboardEntry, NewAccount, Profile, ProfileUpdate, Session, SessionUser, Workout,
    WorkoutCategory,
};

pub const LEADERBOARD_SIZE: i64 = 10;
pub const MAX_WORKOUT_LIMIT: i64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("not found")]
    NotFound,

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("upstream returned {status}")]
    Upstream { status: u16, body: String },

    #[error("request failed: {0}")]
    Request(String),

    #[error("response parse failed: {0}")]
    Parse(String),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkoutOrder {
    #[default]
    Title,
    Duration,
}

impl WorkoutOrder {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "duration" => Some(Self::Duration),
            _ => None,
        }
    }
}

/// Catalog filter. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutQuery {
    pub category: Option<Uuid>,
    pub difficulty: Option<String>,
    pub limit: Option<i64>,
    pub order: WorkoutOrder,
}

impl WorkoutQuery {
    /// Limit clamped to `1..=MAX_WORKOUT_LIMIT`.
    #[must_use]
    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(MAX_WORKOUT_LIMIT).clamp(1, MAX_WORKOUT_LIMIT)
    }
}

#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Create an account. Confirmation (if any) is handled by the service.
    async fn sign_up(&self, account: &NewAccount) -> Result<(), GatewayError>;

    /// Password sign-in. Bad credentials are `Unauthorized`.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, GatewayError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), GatewayError>;

    /// Resolve a token. Expired or unknown tokens are `Unauthorized`.
    async fn current_user(&self, access_token: &str) -> Result<SessionUser, GatewayError>;
}

#[async_trait]
pub trait ProfileGateway: Send + Sync {
    async fn profile(&self, user_id: Uuid) -> Result<Profile, GatewayError>;

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<Profile, GatewayError>;
}

#[async_trait]
pub trait WorkoutGateway: Send + Sync {
    async fn list_workouts(&self, query: &WorkoutQuery) -> Result<Vec<Workout>, GatewayError>;

    async fn workout(&self, id: Uuid) -> Result<Workout, GatewayError>;

    async fn categories(&self) -> Result<Vec<WorkoutCategory>, GatewayError>;
}

#[async_trait]
pub trait AchievementGateway: Send + Sync {
    /// Record a completion and return the user's updated achievement row.
    async fn complete_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<Achievement, GatewayError>;

    /// `None` until the user's first completion.
    async fn achievement(&self, user_id: Uuid) -> Result<Option<Achievement>, GatewayError>;

    /// Top `LEADERBOARD_SIZE` by points, descending.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, GatewayError>;
}
