//! Runs against `DATABASE_URL`; enable with `--features live-db-tests`.

use super::*;
use crate::db::init_pool;

async fn gateway() -> PgGateway {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
    PgGateway::new(init_pool(&url, 2).await.expect("database init failed"))
}

async fn seed_workout(pool: &PgPool, title: &str, duration: i32) -> Uuid {
    let category: Uuid = sqlx::query_scalar(
        "INSERT INTO workout_categories (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind("Live Test Category")
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query_scalar(
        "INSERT INTO workouts (title, duration, difficulty, category_id, instructions, benefits)
         VALUES ($1, $2, 'easy', $3, ARRAY['breathe'], ARRAY['calm'])
         RETURNING id",
    )
    .bind(title)
    .bind(duration)
    .bind(category)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn workout_round_trips_with_category_name() {
    let gw = gateway().await;
    let id = seed_workout(&gw.pool, "Live Chair Stretch", 12).await;

    let workout = gw.workout(id).await.unwrap();
    assert_eq!(workout.title, "Live Chair Stretch");
    assert_eq!(workout.category_name.as_deref(), Some("Live Test Category"));
    assert_eq!(workout.instructions, vec!["breathe".to_owned()]);
    assert_eq!(workout.voice_instructions, None);
}

#[tokio::test]
async fn completion_upserts_achievement() {
    let gw = gateway().await;
    let workout = seed_workout(&gw.pool, "Live Walk", 20).await;
    let user = Uuid::new_v4();

    let first = gw.complete_workout(user, workout).await.unwrap();
    let second = gw.complete_workout(user, workout).await.unwrap();

    assert_eq!(first.workouts_completed, 1);
    assert_eq!(second.workouts_completed, 2);
    assert_eq!(second.points, 20);
    assert_eq!(second.streak_days, 1);
    assert_eq!(gw.achievement(user).await.unwrap(), Some(second));
}

#[tokio::test]
async fn concurrent_first_completions_both_count() {
    let gw = gateway().await;
    let workout = seed_workout(&gw.pool, "Live Concurrent Stretch", 8).await;
    let user = Uuid::new_v4();

    let (a, b) = tokio::join!(gw.complete_workout(user, workout), gw.complete_workout(user, workout));
    a.unwrap();
    b.unwrap();

    let row = gw.achievement(user).await.unwrap().unwrap();
    assert_eq!(row.workouts_completed, 2);
    assert_eq!(row.points, 20);
    assert_eq!(row.last_workout_date, Some(today_utc()));
}

#[tokio::test]
async fn profile_update_then_fetch() {
    let gw = gateway().await;
    let id = Uuid::new_v4();
    let update = ProfileUpdate { first_name: "Grace".into(), last_name: "Hopper".into(), age: Some(71) };
    let saved = gw.update_profile(id, &update).await.unwrap();
    assert_eq!(gw.profile(id).await.unwrap(), saved);
}
