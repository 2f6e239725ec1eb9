//! Current user's profile.

use axum::extract::State;
use axum::response::Json;

use super::auth::AuthUser;
use super::{ApiError, ApiResult};
use crate::gateway::GatewayError;
use crate::gateway::types::{Profile, ProfileUpdate};
use crate::state::AppState;

const MIN_NAME_LEN: usize = 2;
const MAX_AGE: i32 = 130;

pub(crate) fn validate_update(update: &ProfileUpdate) -> Result<(), ApiError> {
    if update.first_name.trim().chars().count() < MIN_NAME_LEN {
        return Err(ApiError::BadRequest("First name must be at least 2 characters".into()));
    }
    if update.last_name.trim().chars().count() < MIN_NAME_LEN {
        return Err(ApiError::BadRequest("Last name must be at least 2 characters".into()));
    }
    if update.age.is_some_and(|age| !(1..=MAX_AGE).contains(&age)) {
        return Err(ApiError::BadRequest(format!("Age must be between 1 and {MAX_AGE}")));
    }
    Ok(())
}

/// `GET /api/profile`: falls back to sign-up names before the first save.
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Profile>> {
    match state.profiles.profile(auth.user.id).await {
        Ok(profile) => Ok(Json(profile)),
        Err(GatewayError::NotFound) => Ok(Json(Profile {
            id: auth.user.id,
            first_name: auth.user.first_name,
            last_name: auth.user.last_name,
            age: None,
        })),
        Err(e) => Err(e.into()),
    }
}

/// `PATCH /api/profile`
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<Json<Profile>> {
    validate_update(&update)?;
    let saved = state.profiles.update_profile(auth.user.id, &update).await?;
    tracing::info!(user_id = %auth.user.id, "profile updated");
    Ok(Json(saved))
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
