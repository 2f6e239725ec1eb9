//! Workout catalog with category, difficulty, and ordering filters.
//!
//! Category/difficulty/order go to the server; the search box filters the
//! fetched list by title on the client.

#[cfg(test)]
#[path = "workouts_test.rs"]
mod workouts_test;

use leptos::prelude::*;

use crate::components::nav_bar::NavBar;
use crate::components::workout_card::WorkoutCard;
use crate::net::api::WorkoutFilter;
use crate::net::types::{Workout, WorkoutCategory};

const DIFFICULTIES: [(&str, &str); 4] = [("", "Any level"), ("easy", "Easy"), ("medium", "Moderate"), ("hard", "Challenging")];
const ORDERS: [(&str, &str); 2] = [("title", "A to Z"), ("duration", "Shortest first")];

#[component]
pub fn WorkoutsPage() -> impl IntoView {
    let categories = RwSignal::new(Vec::<WorkoutCategory>::new());
    let workouts = RwSignal::new(None::<Vec<Workout>>);
    let active_category = RwSignal::new(None::<String>);
    let difficulty = RwSignal::new(String::new());
    let order = RwSignal::new("title".to_owned());
    let search = RwSignal::new(String::new());

    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            categories.set(crate::net::api::fetch_categories().await.unwrap_or_default());
        });
        Effect::new(move || {
            let filter = build_filter(active_category.get(), &difficulty.get(), &order.get());
            leptos::task::spawn_local(async move {
                workouts.set(Some(crate::net::api::fetch_workouts(&filter).await.unwrap_or_default()));
            });
        });
    }

    let visible = move || {
        workouts
            .get()
            .map(|list| filter_by_search(list, &search.get()))
    };

    view! {
        <div class="page">
            <header class="page__header">
                <h1>"Workouts"</h1>
                <p class="muted">"Find activities suited for you"</p>
            </header>
            <input
                class="input input--search"
                type="search"
                placeholder="Search workouts..."
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            <div class="chips">
                <button
                    class=move || chip_class(active_category.get().is_none())
                    on:click=move |_| active_category.set(None)
                >
                    "All"
                </button>
                {move || {
                    categories
                        .get()
                        .into_iter()
                        .map(|category| {
                            let id = category.id.clone();
                            let selected_id = id.clone();
                            view! {
                                <button
                                    class=move || chip_class(active_category.get().as_deref() == Some(selected_id.as_str()))
                                    on:click=move |_| active_category.set(Some(id.clone()))
                                >
                                    {category.name}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="filters">
                <select on:change=move |ev| difficulty.set(event_target_value(&ev)) prop:value=move || difficulty.get()>
                    {DIFFICULTIES
                        .into_iter()
                        .map(|(value, label)| view! { <option value=value>{label}</option> })
                        .collect_view()}
                </select>
                <select on:change=move |ev| order.set(event_target_value(&ev)) prop:value=move || order.get()>
                    {ORDERS
                        .into_iter()
                        .map(|(value, label)| view! { <option value=value>{label}</option> })
                        .collect_view()}
                </select>
            </div>
            {move || match visible() {
                None => view! { <p class="muted">"Loading workouts..."</p> }.into_any(),
                Some(list) if list.is_empty() => {
                    view! { <p class="muted">"No workouts found. Try adjusting your search."</p> }.into_any()
                }
                Some(list) => {
                    view! {
                        <div class="workout-grid">
                            {list.into_iter().map(|workout| view! { <WorkoutCard workout=workout /> }).collect_view()}
                        </div>
                    }
                        .into_any()
                }
            }}
            <NavBar />
        </div>
    }
}

fn chip_class(selected: bool) -> &'static str {
    if selected { "chip chip--selected" } else { "chip" }
}

/// Server-side filter for the current selections. Empty values mean "any".
fn build_filter(category: Option<String>, difficulty: &str, order: &str) -> WorkoutFilter {
    let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_owned());
    WorkoutFilter {
        category: category.filter(|c| !c.is_empty()),
        difficulty: non_empty(difficulty),
        limit: None,
        order: non_empty(order),
    }
}

/// Case-insensitive title match; a blank query keeps everything.
fn filter_by_search(workouts: Vec<Workout>, query: &str) -> Vec<Workout> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return workouts;
    }
    workouts.into_iter().filter(|w| w.title.to_lowercase().contains(&needle)).collect()
}
