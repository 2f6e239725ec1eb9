//! Achievement bookkeeping for a completed workout.

use time::Date;
use uuid::Uuid;

use super::types::Achievement;

pub const POINTS_PER_WORKOUT: i32 = 10;

/// Apply one completion on `today` to the previous achievement row.
///
/// Streak: +1 when the last workout was yesterday, unchanged when it was
/// today, otherwise restarts at 1.
#[must_use]
pub fn next_achievement(user_id: Uuid, previous: Option<&Achievement>, today: Date) -> Achievement {
    let Some(prev) = previous else {
        return Achievement {
            user_id,
            workouts_completed: 1,
            streak_days: 1,
            points: POINTS_PER_WORKOUT,
            last_workout_date: Some(today),
        };
    };

    let streak_days = match prev.last_workout_date {
        Some(day) if day == today => prev.streak_days.max(1),
        Some(day) if day.next_day() == Some(today) => prev.streak_days.saturating_add(1),
        _ => 1,
    };

    Achievement {
        user_id,
        workouts_completed: prev.workouts_completed.saturating_add(1),
        streak_days,
        points: prev.points.saturating_add(POINTS_PER_WORKOUT),
        last_workout_date: Some(today),
    }
}

/// Today's date in UTC.
#[must_use]
pub fn today_utc() -> Date {
    time::OffsetDateTime::now_utc().date()
}

#[cfg(test)]
#[path = "progress_test.rs"]
mod tests;
