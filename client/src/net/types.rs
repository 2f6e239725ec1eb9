//! JSON DTOs for the client/server API boundary.
//!
//! DESIGN
//! ======
//! Field names match the server's JSON (snake_case). Optional columns in the
//! hosted schema stay `Option` here so a sparse row never fails a whole page.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use time::Date;

/// Authenticated identity returned by `/api/auth/me` and sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl User {
    /// First name when known, otherwise the email's local part.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(first) = self.first_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return first.to_owned();
        }
        self.email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or("Friend")
            .to_owned()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Catalog workout with its category name joined in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Length in minutes.
    pub duration: i32,
    pub difficulty: String,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub image_url: Option<String>,
    pub instructor: Option<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub voice_instructions: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
}

/// Body of `PATCH /api/profile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub user_id: String,
    pub workouts_completed: i32,
    pub streak_days: i32,
    pub points: i32,
    #[serde(default, with = "crate::util::calendar::iso_date::option")]
    pub last_workout_date: Option<Date>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub points: i32,
    pub workouts_completed: i32,
}

impl LeaderboardEntry {
    /// "First Last", falling back to "Anonymous" when no name is on file.
    #[must_use]
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() { "Anonymous".to_owned() } else { parts.join(" ") }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Error body returned by every non-2xx API response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}
