//! Single workout: details, spoken guidance, instructions, benefits, and completion.

#[cfg(test)]
#[path = "workout_detail_test.rs"]
mod workout_detail_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::nav_bar::NavBar;
use crate::components::voice_guidance::VoiceGuidance;
use crate::components::workout_card::{difficulty_badge, duration_label};
use crate::net::types::{Achievement, Workout};
use crate::state::session::SessionState;

#[derive(Clone, Debug, PartialEq)]
enum Load {
    Loading,
    Missing,
    Ready(Workout),
}

#[component]
pub fn WorkoutDetailPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let params = use_params_map();
    let workout = RwSignal::new(Load::Loading);
    let message = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        let Some(id) = params.with(|p| p.get("id")) else {
            workout.set(Load::Missing);
            return;
        };
        workout.set(Load::Loading);
        leptos::task::spawn_local(async move {
            let loaded = crate::net::api::fetch_workout(&id).await;
            workout.set(loaded.map_or(Load::Missing, Load::Ready));
        });
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = params;

    let on_complete = move |_| {
        if busy.get_untracked() {
            return;
        }
        let Load::Ready(current) = workout.get_untracked() else {
            return;
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::complete_workout(&current.id).await;
            message.set(Some(completion_message(&result)));
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = current;
    };

    view! {
        <div class="page">
            <a class="back-link" href="/workouts">"Back to workouts"</a>
            {move || match workout.get() {
                Load::Loading => view! { <p class="muted">"Loading workout details..."</p> }.into_any(),
                Load::Missing => {
                    view! {
                        <div class="empty">
                            <h2>"Workout not found"</h2>
                            <a class="btn btn--primary" href="/workouts">"Browse Workouts"</a>
                        </div>
                    }
                        .into_any()
                }
                Load::Ready(w) => {
                    let (difficulty, tone) = difficulty_badge(&w.difficulty);
                    let voice_lines = spoken_lines(&w);
                    view! {
                        <article class="workout-detail">
                            {w.image_url.clone().map(|src| view! { <img class="workout-detail__image" src=src alt=w.title.clone() /> })}
                            <span class="workout-card__category">{w.category_name.clone().unwrap_or_else(|| "General".to_owned())}</span>
                            <h1>{w.title.clone()}</h1>
                            <div class="workout-detail__meta">
                                <span>{duration_label(w.duration)}</span>
                                <span class=format!("workout-card__badge workout-card__badge--{tone}")>{difficulty}</span>
                                {w.instructor.clone().map(|name| view! { <span>{format!("with {name}")}</span> })}
                            </div>
                            {w.description.clone().map(|text| view! { <p>{text}</p> })}
                            {(!voice_lines.is_empty()).then(|| view! { <VoiceGuidance lines=voice_lines /> })}
                            <h2>"Instructions"</h2>
                            <ol>{w.instructions.into_iter().map(|step| view! { <li>{step}</li> }).collect_view()}</ol>
                            <h2>"Benefits"</h2>
                            <ul>{w.benefits.into_iter().map(|b| view! { <li>{b}</li> }).collect_view()}</ul>
                        </article>
                    }
                        .into_any()
                }
            }}
            <Show
                when=move || session.get().is_signed_in()
                fallback=|| {
                    view! {
                        <p class="muted">
                            <a href="/auth">"Sign in"</a>
                            " to track completed workouts."
                        </p>
                    }
                }
            >
                <button
                    class="btn btn--primary btn--wide"
                    disabled=move || busy.get() || !matches!(workout.get(), Load::Ready(_))
                    on:click=on_complete
                >
                    "Mark as Completed"
                </button>
            </Show>
            <Show when=move || message.get().is_some()>
                <p class="notice" role="status">{move || message.get().unwrap_or_default()}</p>
            </Show>
            <NavBar />
        </div>
    }
}

/// Dedicated voice script when the workout has one, otherwise the written steps.
fn spoken_lines(workout: &Workout) -> Vec<String> {
    match &workout.voice_instructions {
        Some(lines) if !lines.is_empty() => lines.clone(),
        _ => workout.instructions.clone(),
    }
}

fn completion_message(result: &Result<Achievement, String>) -> String {
    match result {
        Ok(a) => format!(
            "Great job! {} workouts completed, {} points, {}-day streak.",
            a.workouts_completed, a.points, a.streak_days
        ),
        Err(e) => format!("Could not record this workout: {e}"),
    }
}
