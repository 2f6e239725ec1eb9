//! Weekly schedule of planned workouts, kept on this device.
//!
//! SYSTEM CONTEXT
//! ==============
//! "Today" and the stored schedule are read after hydration, so the server
//! render and the first client render agree on an empty page.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use leptos::prelude::*;
use time::Date;

use crate::components::nav_bar::NavBar;
use crate::state::preferences::save_notice;
use crate::state::schedule::{DURATIONS, Schedule, ScheduleDraft, ScheduledWorkout, WORKOUT_TYPES};
use crate::util::calendar::{self, format_iso, month_label, short_day_label, weekday_label, week_of};
use crate::util::storage::browser_store;

#[component]
pub fn SchedulePage() -> impl IntoView {
    let store = StoredValue::new(browser_store());
    let today = RwSignal::new(None::<Date>);
    let schedule = RwSignal::new(Schedule::default());
    let form_open = RwSignal::new(false);
    let draft = RwSignal::new(None::<ScheduleDraft>);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);

    Effect::new(move || {
        let now = calendar::today();
        today.set(Some(now));
        schedule.set(store.with_value(|s| Schedule::load(s.as_ref())));
        draft.set(Some(ScheduleDraft::new(now)));
    });

    let persist = move |next: Schedule| {
        notice.set(store.with_value(|s| save_notice(next.save(s.as_ref()))));
        schedule.set(next);
    };

    let on_submit = move |_| {
        let (Some(now), Some(current)) = (today.get_untracked(), draft.get_untracked()) else {
            return;
        };
        let mut next = schedule.get_untracked();
        match next.add(&current, now) {
            Ok(_) => {
                error.set(None);
                form_open.set(false);
                draft.set(Some(ScheduleDraft::new(now)));
                persist(next);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };
    let on_cancel = move |_| {
        error.set(None);
        form_open.set(false);
    };
    let on_remove = Callback::new(move |id: u64| {
        let mut next = schedule.get_untracked();
        if next.remove(id) {
            persist(next);
        }
    });

    let edit = move |apply: fn(&mut ScheduleDraft, String), value: String| {
        draft.update(|d| {
            if let Some(d) = d {
                apply(d, value);
            }
        });
    };
    let field = move |read: fn(&ScheduleDraft) -> String| draft.with(|d| d.as_ref().map(read).unwrap_or_default());

    view! {
        <div class="page schedule">
            <header class="page__header">
                <h1>"My Schedule"</h1>
                <p class="muted">"Plan and manage your workout sessions"</p>
            </header>
            {move || match today.get() {
                None => view! { <p class="muted">"Loading schedule..."</p> }.into_any(),
                Some(now) => {
                    view! {
                        <div class="section-header">
                            <h2>{month_label(now)}</h2>
                            <button class="btn btn--primary" on:click=move |_| form_open.set(true)>
                                "Schedule Workout"
                            </button>
                        </div>
                        <div class="schedule__week">
                            {week_of(now)
                                .into_iter()
                                .map(|day| {
                                    view! {
                                        <div class=day_class(day, now)>
                                            <p class="muted">{weekday_label(day)}</p>
                                            <p class="schedule__day-number">{day.day()}</p>
                                            {move || {
                                                schedule
                                                    .with(|s| s.on(day))
                                                    .into_iter()
                                                    .map(|entry| {
                                                        view! {
                                                            <div class="schedule__entry">
                                                                <p>{entry.title.clone()}</p>
                                                                <span>{entry.time_label()}</span>
                                                            </div>
                                                        }
                                                    })
                                                    .collect_view()
                                            }}
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <h3>"Upcoming Workouts"</h3>
                        <div class="schedule__upcoming">
                            {move || {
                                let upcoming = schedule.with(|s| s.upcoming(now));
                                if upcoming.is_empty() {
                                    return view! { <p class="muted">"Nothing planned yet."</p> }.into_any();
                                }
                                upcoming
                                    .into_iter()
                                    .map(|entry| view! { <UpcomingRow entry=entry on_remove=on_remove /> })
                                    .collect_view()
                                    .into_any()
                            }}
                        </div>
                    }
                        .into_any()
                }
            }}
            <Show when=move || form_open.get()>
                <div class="modal" role="dialog" aria-label="Schedule a Workout">
                    <h2>"Schedule a Workout"</h2>
                    <label for="workout-date">"Date"</label>
                    <input
                        id="workout-date"
                        class="input"
                        type="date"
                        min=move || today.get().map(format_iso).unwrap_or_default()
                        prop:value=move || field(|d| d.date.clone())
                        on:input=move |ev| edit(|d, v| d.date = v, event_target_value(&ev))
                    />
                    <label for="workout-type">"Workout Type"</label>
                    <select
                        id="workout-type"
                        prop:value=move || field(|d| d.kind.clone())
                        on:change=move |ev| edit(|d, v| d.kind = v, event_target_value(&ev))
                    >
                        {WORKOUT_TYPES
                            .into_iter()
                            .map(|(value, label)| view! { <option value=value>{label}</option> })
                            .collect_view()}
                    </select>
                    <label for="workout-title">"Title"</label>
                    <input
                        id="workout-title"
                        class="input"
                        placeholder="e.g., Morning Stretch"
                        prop:value=move || field(|d| d.title.clone())
                        on:input=move |ev| edit(|d, v| d.title = v, event_target_value(&ev))
                    />
                    <label for="workout-time">"Time"</label>
                    <input
                        id="workout-time"
                        class="input"
                        type="time"
                        prop:value=move || field(|d| d.time.clone())
                        on:input=move |ev| edit(|d, v| d.time = v, event_target_value(&ev))
                    />
                    <label for="workout-duration">"Duration (minutes)"</label>
                    <select
                        id="workout-duration"
                        prop:value=move || field(|d| d.duration_minutes.to_string())
                        on:change=move |ev| edit(set_duration, event_target_value(&ev))
                    >
                        {DURATIONS
                            .into_iter()
                            .map(|m| view! { <option value=m.to_string()>{format!("{m} minutes")}</option> })
                            .collect_view()}
                    </select>
                    <Show when=move || error.get().is_some()>
                        <p class="notice notice--error" role="alert">
                            {move || error.get().unwrap_or_default()}
                        </p>
                    </Show>
                    <div class="modal__actions">
                        <button class="btn" on:click=on_cancel>
                            "Cancel"
                        </button>
                        <button class="btn btn--primary" on:click=on_submit>
                            "Schedule"
                        </button>
                    </div>
                </div>
            </Show>
            <Show when=move || notice.get().is_some()>
                <p class="notice" role="status">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <NavBar />
        </div>
    }
}

#[component]
fn UpcomingRow(entry: ScheduledWorkout, on_remove: Callback<u64>) -> impl IntoView {
    let id = entry.id;
    view! {
        <div class="schedule__row">
            <div>
                <h4>{entry.title.clone()}</h4>
                <p class="muted">{entry.summary()}</p>
            </div>
            <div class="schedule__when">
                <p>{short_day_label(entry.date)}</p>
                <p class="muted">{entry.time_label()}</p>
                <button class="btn btn--link" on:click=move |_| on_remove.run(id)>
                    "Remove"
                </button>
            </div>
        </div>
    }
}

fn day_class(day: Date, today: Date) -> &'static str {
    if day == today { "schedule__day schedule__day--today" } else { "schedule__day" }
}

fn set_duration(draft: &mut ScheduleDraft, raw: String) {
    if let Ok(minutes) = raw.parse::<u16>() {
        if DURATIONS.contains(&minutes) {
            draft.duration_minutes = minutes;
        }
    }
}
