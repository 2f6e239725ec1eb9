use time::Month;
use time::macros::date;

use super::*;

fn row(completed: i32, streak: i32, points: i32, last: Option<Date>) -> Achievement {
    Achievement {
        user_id: Uuid::nil(),
        workouts_completed: completed,
        streak_days: streak,
        points,
        last_workout_date: last,
    }
}

#[test]
fn first_completion_starts_everything_at_one() {
    let next = next_achievement(Uuid::nil(), None, date!(2026 - 03 - 14));
    assert_eq!(next, row(1, 1, 10, Some(date!(2026 - 03 - 14))));
}

#[test]
fn consecutive_day_extends_streak() {
    let prev = row(4, 3, 40, Some(date!(2026 - 03 - 13)));
    let next = next_achievement(Uuid::nil(), Some(&prev), date!(2026 - 03 - 14));
    assert_eq!(next, row(5, 4, 50, Some(date!(2026 - 03 - 14))));
}

#[test]
fn same_day_keeps_streak() {
    let prev = row(5, 4, 50, Some(date!(2026 - 03 - 14)));
    let next = next_achievement(Uuid::nil(), Some(&prev), date!(2026 - 03 - 14));
    assert_eq!(next.streak_days, 4);
    assert_eq!(next.workouts_completed, 6);
    assert_eq!(next.points, 60);
}

#[test]
fn gap_resets_streak() {
    let prev = row(5, 4, 50, Some(date!(2026 - 03 - 10)));
    let next = next_achievement(Uuid::nil(), Some(&prev), date!(2026 - 03 - 14));
    assert_eq!(next.streak_days, 1);
}

#[test]
fn streak_crosses_month_and_year_boundaries() {
    let prev = row(1, 1, 10, Some(date!(2025 - 12 - 31)));
    let next = next_achievement(Uuid::nil(), Some(&prev), date!(2026 - 01 - 01));
    assert_eq!(next.streak_days, 2);

    let prev = row(1, 1, 10, Some(date!(2028 - 02 - 28)));
    let next = next_achievement(Uuid::nil(), Some(&prev), date!(2028 - 02 - 29));
    assert_eq!(next.streak_days, 2);
}

#[test]
fn missing_last_date_restarts_streak() {
    let prev = row(2, 2, 20, None);
    let next = next_achievement(Uuid::nil(), Some(&prev), date!(2026 - 03 - 14));
    assert_eq!(next.streak_days, 1);
    assert_eq!(next.points, 30);
}

#[test]
fn achievement_date_serializes_as_calendar_day() {
    let achievement = row(1, 1, 10, Some(Date::from_calendar_date(2026, Month::March, 4).unwrap()));
    let json = serde_json::to_value(&achievement).unwrap();
    assert_eq!(json["last_workout_date"], "2026-03-04");

    let back: Achievement = serde_json::from_value(json).unwrap();
    assert_eq!(back, achievement);
}

#[test]
fn achievement_date_is_optional_on_the_wire() {
    let json = serde_json::json!({
        "user_id": Uuid::nil(),
        "workouts_completed": 0,
        "streak_days": 0,
        "points": 0,
    });
    let achievement: Achievement = serde_json::from_value(json).unwrap();
    assert_eq!(achievement.last_workout_date, None);

    let bad = serde_json::json!({
        "user_id": Uuid::nil(),
        "workouts_completed": 0,
        "streak_days": 0,
        "points": 0,
        "last_workout_date": "2026-02-30",
    });
    assert!(serde_json::from_value::<Achievement>(bad).is_err());
}
