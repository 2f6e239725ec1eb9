//! Records exchanged between gateways and routes.
//!
//! These serialize straight into API responses, so field names are the JSON
//! names the client expects.

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

// Calendar dates travel as `YYYY-MM-DD`.
time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// Identity resolved from a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A signed-in session: the bearer token plus who it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub duration: i32,
    pub difficulty: String,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub image_url: Option<String>,
    pub instructor: Option<String>,
    pub instructions: Vec<String>,
    pub benefits: Vec<String>,
    pub voice_instructions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub user_id: Uuid,
    pub workouts_completed: i32,
    pub streak_days: i32,
    pub points: i32,
    #[serde(default, with = "calendar_date::option")]
    pub last_workout_date: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub points: i32,
    pub workouts_completed: i32,
}
