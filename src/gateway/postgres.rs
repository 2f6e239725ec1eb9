//! Record gateways over the hosted Postgres database.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder, Row};
use uuid::Uuid;

use super::progress::{next_achievement, today_utc};
use super::types::{Achievement, LeaderboardEntry, Profile, ProfileUpdate, Workout, WorkoutCategory};
use super::{AchievementGateway, GatewayError, LEADERBOARD_SIZE, ProfileGateway, WorkoutGateway, WorkoutOrder, WorkoutQuery};

const WORKOUT_COLUMNS: &str = "w.id, w.title, w.description, w.duration, w.difficulty, w.category_id,
     c.name AS category_name, w.image_url, w.instructor, w.instructions, w.benefits, w.voice_instructions";

const ACHIEVEMENT_COLUMNS: &str = "user_id, workouts_completed, streak_days, points, last_workout_date";

#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// =============================================================================
// ROW MAPPING
// =============================================================================

fn workout_from_row(row: &PgRow) -> Result<Workout, sqlx::Error> {
    Ok(Workout {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        duration: row.try_get("duration")?,
        difficulty: row.try_get("difficulty")?,
        category_id: row.try_get("category_id")?,
        category_name: row.try_get("category_name")?,
        image_url: row.try_get("image_url")?,
        instructor: row.try_get("instructor")?,
        instructions: row.try_get("instructions")?,
        benefits: row.try_get("benefits")?,
        voice_instructions: row.try_get("voice_instructions")?,
    })
}

fn achievement_from_row(row: &PgRow) -> Result<Achievement, sqlx::Error> {
    Ok(Achievement {
        user_id: row.try_get("user_id")?,
        workouts_completed: row.try_get("workouts_completed")?,
        streak_days: row.try_get("streak_days")?,
        points: row.try_get("points")?,
        last_workout_date: row.try_get("last_workout_date")?,
    })
}

fn profile_from_row(row: &PgRow) -> Result<Profile, sqlx::Error> {
    Ok(Profile {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        age: row.try_get("age")?,
    })
}

fn non_empty(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// =============================================================================
// PROFILES
// =============================================================================

#[async_trait]
impl ProfileGateway for PgGateway {
    async fn profile(&self, user_id: Uuid) -> Result<Profile, GatewayError> {
        let row = sqlx::query("SELECT id, first_name, last_name, age FROM profiles WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(GatewayError::NotFound)?;
        Ok(profile_from_row(&row)?)
    }

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<Profile, GatewayError> {
        let row = sqlx::query(
            "INSERT INTO profiles (id, first_name, last_name, age, updated_at)
             VALUES ($1, $2, $3, $4, now())
             ON CONFLICT (id) DO UPDATE
             SET first_name = EXCLUDED.first_name,
                 last_name = EXCLUDED.last_name,
                 age = EXCLUDED.age,
                 updated_at = now()
             RETURNING id, first_name, last_name, age",
        )
        .bind(user_id)
        .bind(non_empty(&update.first_name))
        .bind(non_empty(&update.last_name))
        .bind(update.age)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile_from_row(&row)?)
    }
}

// =============================================================================
// WORKOUTS
// =============================================================================

#[async_trait]
impl WorkoutGateway for PgGateway {
    async fn list_workouts(&self, query: &WorkoutQuery) -> Result<Vec<Workout>, GatewayError> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {WORKOUT_COLUMNS}
             FROM workouts w
             LEFT JOIN workout_categories c ON c.id = w.category_id
             WHERE TRUE"
        ));
        if let Some(category) = query.category {
            builder.push(" AND w.category_id = ").push_bind(category);
        }
        if let Some(difficulty) = &query.difficulty {
            builder.push(" AND lower(w.difficulty) = lower(").push_bind(difficulty.clone()).push(")");
        }
        builder.push(match query.order {
            WorkoutOrder::Title => " ORDER BY w.title ASC",
            WorkoutOrder::Duration => " ORDER BY w.duration ASC, w.title ASC",
        });
        builder.push(" LIMIT ").push_bind(query.effective_limit());

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(|row| workout_from_row(row).map_err(GatewayError::from)).collect()
    }

    async fn workout(&self, id: Uuid) -> Result<Workout, GatewayError> {
        let row = sqlx::query(&format!(
            "SELECT {WORKOUT_COLUMNS}
             FROM workouts w
             LEFT JOIN workout_categories c ON c.id = w.category_id
             WHERE w.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(GatewayError::NotFound)?;
        Ok(workout_from_row(&row)?)
    }

    async fn categories(&self) -> Result<Vec<WorkoutCategory>, GatewayError> {
        let rows = sqlx::query_as::<_, (Uuid, String, Option<String>)>(
            "SELECT id, name, description FROM workout_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, description)| WorkoutCategory { id, name, description })
            .collect())
    }
}

// =============================================================================
// ACHIEVEMENTS
// =============================================================================

#[async_trait]
impl AchievementGateway for PgGateway {
    async fn complete_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<Achievement, GatewayError> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM workouts WHERE id = $1)")
            .bind(workout_id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(GatewayError::NotFound);
        }

        sqlx::query("INSERT INTO user_workouts (user_id, workout_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(workout_id)
            .execute(&mut *tx)
            .await?;

        // Make sure a row exists so FOR UPDATE serializes concurrent first completions.
        sqlx::query("INSERT INTO user_achievements (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query(&format!(
            "SELECT {ACHIEVEMENT_COLUMNS} FROM user_achievements WHERE user_id = $1 FOR UPDATE"
        ))
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        let previous = achievement_from_row(&row)?;

        let next = next_achievement(user_id, Some(&previous), today_utc());
        let row = sqlx::query(&format!(
            "UPDATE user_achievements
             SET workouts_completed = $2,
                 streak_days = $3,
                 points = $4,
                 last_workout_date = $5,
                 updated_at = now()
             WHERE user_id = $1
             RETURNING {ACHIEVEMENT_COLUMNS}"
        ))
        .bind(user_id)
        .bind(next.workouts_completed)
        .bind(next.streak_days)
        .bind(next.points)
        .bind(next.last_workout_date)
        .fetch_one(&mut *tx)
        .await?;
        let saved = achievement_from_row(&row)?;

        tx.commit().await?;
        tracing::info!(%user_id, %workout_id, points = saved.points, streak = saved.streak_days, "workout completed");
        Ok(saved)
    }

    async fn achievement(&self, user_id: Uuid) -> Result<Option<Achievement>, GatewayError> {
        let row = sqlx::query(&format!("SELECT {ACHIEVEMENT_COLUMNS} FROM user_achievements WHERE user_id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|row| achievement_from_row(&row)).transpose()?)
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, GatewayError> {
        let rows = sqlx::query_as::<_, (Uuid, Option<String>, Option<String>, i32, i32)>(
            "SELECT a.user_id, p.first_name, p.last_name, a.points, a.workouts_completed
             FROM user_achievements a
             LEFT JOIN profiles p ON p.id = a.user_id
             ORDER BY a.points DESC, a.user_id ASC
             LIMIT $1",
        )
        .bind(LEADERBOARD_SIZE)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(user_id, first_name, last_name, points, workouts_completed)| LeaderboardEntry {
                user_id,
                first_name,
                last_name,
                points,
                workouts_completed,
            })
            .collect())
    }
}

#[cfg(all(test, feature = "live-db-tests"))]
#[path = "postgres_test.rs"]
mod tests;
