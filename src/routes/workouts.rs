//! Workout catalog routes.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiError, ApiResult};
use crate::gateway::types::{Workout, WorkoutCategory};
use crate::gateway::{GatewayError, WorkoutOrder, WorkoutQuery};
use crate::state::AppState;

/// Raw query string. Parsed by hand so bad values get readable messages.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    category: Option<String>,
    difficulty: Option<String>,
    limit: Option<String>,
    order: Option<String>,
}

fn present(raw: Option<&String>) -> Option<&str> {
    raw.map(|s| s.trim()).filter(|s| !s.is_empty())
}

pub(crate) fn parse_query(params: &ListParams) -> Result<WorkoutQuery, ApiError> {
    let category = present(params.category.as_ref())
        .map(|raw| Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("invalid category id: {raw}"))))
        .transpose()?;

    let limit = present(params.limit.as_ref())
        .map(|raw| match raw.parse::<i64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ApiError::BadRequest(format!("limit must be a positive number, got {raw}"))),
        })
        .transpose()?;

    let order = match present(params.order.as_ref()) {
        None => WorkoutOrder::default(),
        Some(raw) => WorkoutOrder::parse(raw)
            .ok_or_else(|| ApiError::BadRequest(format!("order must be title or duration, got {raw}")))?,
    };

    Ok(WorkoutQuery {
        category,
        difficulty: present(params.difficulty.as_ref()).map(str::to_ascii_lowercase),
        limit,
        order,
    })
}

/// Path ids that are not UUIDs cannot name a workout.
pub(crate) fn parse_workout_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| GatewayError::NotFound.into())
}

/// `GET /api/workouts`: filtered, ordered catalog.
pub async fn list(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult<Json<Vec<Workout>>> {
    let query = parse_query(&params)?;
    Ok(Json(state.workouts.list_workouts(&query).await?))
}

/// `GET /api/workouts/{id}`
pub async fn get_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Workout>> {
    let id = parse_workout_id(&id)?;
    Ok(Json(state.workouts.workout(id).await?))
}

/// `GET /api/categories`
pub async fn categories(State(state): State<AppState>) -> ApiResult<Json<Vec<WorkoutCategory>>> {
    Ok(Json(state.workouts.categories().await?))
}

#[cfg(test)]
#[path = "workouts_test.rs"]
mod tests;
