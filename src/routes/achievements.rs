//! Completions, achievements, leaderboard.

use axum::extract::{Path, State};
use axum::response::Json;

use super::ApiResult;
use super::auth::AuthUser;
use super::workouts::parse_workout_id;
use crate::gateway::types::{Achievement, LeaderboardEntry};
use crate::state::AppState;

/// `POST /api/workouts/{id}/complete`
pub async fn complete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Achievement>> {
    let workout_id = parse_workout_id(&id)?;
    let achievement = state.achievements.complete_workout(auth.user.id, workout_id).await?;
    Ok(Json(achievement))
}

/// `GET /api/achievements/me`: a zeroed row before the first completion.
pub async fn mine(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Achievement>> {
    let row = state.achievements.achievement(auth.user.id).await?;
    Ok(Json(row.unwrap_or(Achievement {
        user_id: auth.user.id,
        workouts_completed: 0,
        streak_days: 0,
        points: 0,
        last_workout_date: None,
    })))
}

/// `GET /api/leaderboard`
pub async fn leaderboard(State(state): State<AppState>) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(state.achievements.leaderboard().await?))
}

#[cfg(test)]
#[path = "achievements_test.rs"]
mod tests;
