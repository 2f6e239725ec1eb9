use time::macros::date;

use super::*;

fn with_last(date: Option<Date>) -> Achievement {
    Achievement {
        user_id: "u-1".to_owned(),
        workouts_completed: 4,
        streak_days: 2,
        points: 40,
        last_workout_date: date,
    }
}

#[test]
fn daily_progress_is_full_after_a_workout_today() {
    assert_eq!(daily_progress(&with_last(Some(date!(2026 - 03 - 14))), date!(2026 - 03 - 14)), 100);
}

#[test]
fn daily_progress_is_empty_for_older_workouts() {
    let today = date!(2026 - 03 - 14);
    assert_eq!(daily_progress(&with_last(Some(date!(2026 - 03 - 13))), today), 0);
    assert_eq!(daily_progress(&with_last(None), today), 0);
}
