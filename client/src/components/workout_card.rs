//! Catalog card linking to a workout's detail page.

#[cfg(test)]
#[path = "workout_card_test.rs"]
mod workout_card_test;

use leptos::prelude::*;

use crate::net::types::Workout;

#[component]
pub fn WorkoutCard(workout: Workout) -> impl IntoView {
    let href = format!("/workouts/{}", workout.id);
    let (label, tone) = difficulty_badge(&workout.difficulty);
    let category = workout.category_name.clone().unwrap_or_else(|| "General".to_owned());
    let duration = duration_label(workout.duration);

    view! {
        <a href=href class="workout-card">
            {workout.image_url.clone().map(|src| {
                view! { <img class="workout-card__image" src=src alt=workout.title.clone() /> }
            })}
            <span class=format!("workout-card__badge workout-card__badge--{tone}")>{label}</span>
            <span class="workout-card__category">{category}</span>
            <h3 class="workout-card__title">{workout.title.clone()}</h3>
            <span class="workout-card__duration">{duration}</span>
        </a>
    }
}

/// Display label and tone for a stored difficulty value.
pub fn difficulty_badge(difficulty: &str) -> (&'static str, &'static str) {
    match difficulty.trim().to_ascii_lowercase().as_str() {
        "easy" | "beginner" => ("Easy", "easy"),
        "medium" | "intermediate" => ("Moderate", "medium"),
        "hard" | "advanced" => ("Challenging", "hard"),
        _ => ("All levels", "neutral"),
    }
}

pub fn duration_label(minutes: i32) -> String {
    if minutes == 1 { "1 min".to_owned() } else { format!("{minutes} mins") }
}
