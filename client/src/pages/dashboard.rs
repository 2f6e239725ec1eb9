//! Dashboard: greeting, progress and badges, quote, suggested workouts, leaderboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The greeting comes from the onboarding profile in the preference store, so
//! it works before sign-in. Progress numbers need a session and show a
//! sign-in prompt otherwise.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use time::Date;

use crate::components::achievement_badges::AchievementBadges;
use crate::components::leaderboard::Leaderboard;
use crate::components::nav_bar::NavBar;
use crate::components::workout_card::WorkoutCard;
use crate::net::types::{Achievement, Workout};
use crate::state::preferences::{concern_signal, use_preferences};
use crate::state::session::SessionState;
use crate::util::calendar;

const QUOTE: (&str, &str) = (
    "Movement is a medicine for creating change in a person's physical, emotional, and mental states.",
    "Carol Welch",
);

/// Workouts per day that count as a full daily goal.
const DAILY_TARGET: i32 = 1;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let prefs = use_preferences();
    let profile = concern_signal(&prefs.onboarding);
    let achievement = RwSignal::new(None::<Achievement>);
    let suggested = RwSignal::new(Vec::<Workout>::new());

    Effect::new(move || {
        prefs.onboarding.mount();
    });

    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            let filter = crate::net::api::WorkoutFilter { limit: Some(3), ..Default::default() };
            suggested.set(crate::net::api::fetch_workouts(&filter).await.unwrap_or_default());
        });
        Effect::new(move || {
            if session.get().is_signed_in() {
                leptos::task::spawn_local(async move {
                    achievement.set(crate::net::api::fetch_my_achievements().await);
                });
            }
        });
    }

    let greeting_name = move || profile.with(|p| p.display_name().to_owned());

    view! {
        <div class="page">
            <header class="page__header">
                <h1>"Hello, " <span class="accent">{greeting_name}</span></h1>
                <p class="muted">"Let's work on your wellness today"</p>
            </header>
            <section class="dashboard__progress">
                <h2>"Your Progress"</h2>
                <Show
                    when=move || session.get().is_signed_in()
                    fallback=|| {
                        view! {
                            <p class="muted">
                                <a href="/auth">"Sign in"</a>
                                " to track your progress."
                            </p>
                        }
                    }
                >
                    {move || {
                        let stats = achievement.get().unwrap_or_default();
                        view! {
                            <div class="stats">
                                <div class="stats__ring">
                                    <span class="stats__value">{format!("{}%", daily_progress(&stats, calendar::today()))}</span>
                                    <span class="muted">"Daily Goal"</span>
                                </div>
                                <div class="stats__cell">
                                    <span class="stats__value">{stats.streak_days}</span>
                                    <span class="muted">"Day Streak"</span>
                                </div>
                                <div class="stats__cell">
                                    <span class="stats__value">{stats.workouts_completed}</span>
                                    <span class="muted">"Total"</span>
                                </div>
                                <div class="stats__cell">
                                    <span class="stats__value">{stats.points}</span>
                                    <span class="muted">"Points"</span>
                                </div>
                            </div>
                            <AchievementBadges achievement=stats.clone() />
                        }
                    }}
                </Show>
            </section>
            <section class="quote-card">
                <blockquote>{QUOTE.0}</blockquote>
                <cite>{QUOTE.1}</cite>
            </section>
            <section>
                <div class="section-header">
                    <h2>"Suggested Workouts"</h2>
                    <a href="/workouts">"See all"</a>
                </div>
                <div class="workout-grid">
                    {move || {
                        suggested
                            .get()
                            .into_iter()
                            .map(|workout| view! { <WorkoutCard workout=workout /> })
                            .collect_view()
                    }}
                </div>
            </section>
            <Leaderboard />
            <NavBar />
        </div>
    }
}

/// Percent of today's target met, judged from the last workout date.
fn daily_progress(achievement: &Achievement, today: Date) -> i32 {
    if achievement.last_workout_date == Some(today) { 100 / DAILY_TARGET } else { 0 }
}
