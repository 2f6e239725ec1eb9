//! Milestone badges earned from the achievement row.

#[cfg(test)]
#[path = "achievement_badges_test.rs"]
mod achievement_badges_test;

use leptos::prelude::*;

use crate::net::types::Achievement;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Badge {
    pub title: &'static str,
    pub description: &'static str,
}

struct Milestone {
    badge: Badge,
    reached: fn(&Achievement) -> bool,
}

const MILESTONES: [Milestone; 5] = [
    Milestone {
        badge: Badge { title: "First Steps", description: "Completed your first workout" },
        reached: |a| a.workouts_completed >= 1,
    },
    Milestone {
        badge: Badge { title: "Consistency", description: "Completed 5 workouts" },
        reached: |a| a.workouts_completed >= 5,
    },
    Milestone {
        badge: Badge { title: "On a Roll", description: "Worked out 3 days in a row" },
        reached: |a| a.streak_days >= 3,
    },
    Milestone {
        badge: Badge { title: "Week Strong", description: "Worked out 7 days in a row" },
        reached: |a| a.streak_days >= 7,
    },
    Milestone {
        badge: Badge { title: "Century", description: "Earned 100 points" },
        reached: |a| a.points >= 100,
    },
];

/// Badges reached so far, in milestone order.
#[must_use]
pub fn earned_badges(achievement: &Achievement) -> Vec<Badge> {
    MILESTONES.iter().filter(|m| (m.reached)(achievement)).map(|m| m.badge).collect()
}

#[component]
pub fn AchievementBadges(achievement: Achievement) -> impl IntoView {
    let badges = earned_badges(&achievement);
    view! {
        <section class="badges">
            <h2>"Achievements"</h2>
            {if badges.is_empty() {
                view! { <p class="muted">"Complete a workout to earn your first badge."</p> }.into_any()
            } else {
                badges
                    .into_iter()
                    .map(|b| {
                        view! {
                            <div class="badge">
                                <div class="badge__title">{b.title}</div>
                                <div class="muted">{b.description}</div>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </section>
    }
}
