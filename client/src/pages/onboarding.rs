//! Four-step onboarding: welcome, about you, goals, preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! Answers live in an `OnboardingFlow` draft until the last step. Finishing
//! commits the profile through the onboarding concern, which is what makes
//! the completion flag durable and sticky.

#[cfg(test)]
#[path = "onboarding_test.rs"]
mod onboarding_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use prefs::onboarding::GOALS;
use prefs::{Advance, OnboardingFlow, OnboardingProfile, OnboardingStep, PreferenceContext};

use crate::state::preferences::{save_notice, use_preferences};

#[component]
pub fn OnboardingPage() -> impl IntoView {
    let prefs = use_preferences();
    let navigate = use_navigate();
    let flow = RwSignal::new(prefs.start_onboarding());
    let error = RwSignal::new(None::<String>);
    let finished = RwSignal::new(false);
    let save_warning = RwSignal::new(None::<String>);

    Effect::new(move || {
        if finished.get() {
            navigate("/dashboard", NavigateOptions::default());
        }
    });

    let on_next = Callback::new(move |()| {
        let mut draft = flow.get_untracked();
        match draft.advance() {
            Ok(Advance::Step(_)) => {
                error.set(None);
                flow.set(draft);
            }
            Ok(Advance::Completed(profile)) => match finish(&prefs, profile) {
                Finish::Dashboard => finished.set(true),
                Finish::Warn(notice) => save_warning.set(Some(notice)),
            },
            Err(err) => error.set(Some(err.to_string())),
        }
    });
    let on_back = move |_| {
        error.set(None);
        flow.update(OnboardingFlow::back);
    };

    let step = move || flow.with(OnboardingFlow::step);

    view! {
        <div class="onboarding">
            <div class="onboarding__card">
                <div class="onboarding__dots">
                    {move || {
                        step_dot_classes(step())
                            .into_iter()
                            .map(|class| view! { <span class=class></span> })
                            .collect_view()
                    }}
                </div>
                <div class="onboarding__body">
                    {move || match step() {
                        OnboardingStep::Welcome => {
                            view! {
                                <div class="onboarding__welcome">
                                    <h1>{OnboardingStep::Welcome.title()}</h1>
                                    <p>
                                        "Your personal wellness companion designed specifically for healthy aging"
                                    </p>
                                    <button class="btn btn--primary btn--wide" on:click=move |_| on_next.run(())>
                                        "Get Started"
                                    </button>
                                </div>
                            }
                                .into_any()
                        }
                        OnboardingStep::AboutYou => {
                            view! {
                                <div>
                                    <h2>"Tell us about yourself"</h2>
                                    <label for="name">"Your Name"</label>
                                    <input
                                        id="name"
                                        class="input"
                                        placeholder="Enter your name"
                                        prop:value=move || flow.with(|f| f.name().to_owned())
                                        on:input=move |ev| flow.update(|f| f.set_name(event_target_value(&ev)))
                                    />
                                    <label for="age">"Your Age"</label>
                                    <input
                                        id="age"
                                        class="input"
                                        type="number"
                                        placeholder="Enter your age"
                                        prop:value=move || flow.with(|f| f.age().to_owned())
                                        on:input=move |ev| flow.update(|f| f.set_age(event_target_value(&ev)))
                                    />
                                </div>
                            }
                                .into_any()
                        }
                        OnboardingStep::Goals => {
                            view! {
                                <div>
                                    <h2>"Select your wellness goals"</h2>
                                    <p class="muted">"Choose all that apply to you"</p>
                                    {GOALS
                                        .iter()
                                        .map(|goal| {
                                            let id = goal.id;
                                            let class = move || {
                                                if flow.with(|f| f.is_selected(id)) {
                                                    "goal goal--selected"
                                                } else {
                                                    "goal"
                                                }
                                            };
                                            view! {
                                                <button class=class on:click=move |_| flow.update(|f| f.toggle_goal(id))>
                                                    <h3>{goal.label}</h3>
                                                    <p>{goal.description}</p>
                                                </button>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            }
                                .into_any()
                        }
                        OnboardingStep::Preferences => {
                            view! {
                                <div class="onboarding__done">
                                    <h2>"You're all set!"</h2>
                                    <p>
                                        "We've created a personalized experience based on your preferences. Let's start your wellness journey!"
                                    </p>
                                </div>
                            }
                                .into_any()
                        }
                    }}
                </div>
                <Show when=move || error.get().is_some()>
                    <p class="notice notice--error" role="alert">
                        {move || error.get().unwrap_or_default()}
                    </p>
                </Show>
                <Show when=move || save_warning.get().is_some()>
                    <p class="notice notice--error" role="alert">
                        {move || save_warning.get().unwrap_or_default()}
                    </p>
                    <button class="btn btn--primary btn--wide" on:click=move |_| finished.set(true)>
                        "Continue to Dashboard"
                    </button>
                </Show>
                <Show when=move || step() != OnboardingStep::Welcome && save_warning.get().is_none()>
                    <div class="onboarding__actions">
                        <button class="btn" on:click=on_back>
                            "Back"
                        </button>
                        <button class="btn btn--primary" on:click=move |_| on_next.run(())>
                            {move || next_label(step())}
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}

/// Where the wizard goes once the last step is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Finish {
    Dashboard,
    /// Completed in memory only; stay put so the notice is seen.
    Warn(String),
}

fn finish(prefs: &PreferenceContext, profile: OnboardingProfile) -> Finish {
    match save_notice(prefs.complete_onboarding(profile)) {
        None => Finish::Dashboard,
        Some(notice) => Finish::Warn(notice),
    }
}

/// One class per step dot: current, already passed, or upcoming.
fn step_dot_classes(current: OnboardingStep) -> Vec<&'static str> {
    OnboardingStep::ALL
        .iter()
        .map(|s| match s.index().cmp(&current.index()) {
            std::cmp::Ordering::Equal => "dot dot--current",
            std::cmp::Ordering::Less => "dot dot--done",
            std::cmp::Ordering::Greater => "dot",
        })
        .collect()
}

fn next_label(step: OnboardingStep) -> &'static str {
    if step.is_last() { "Get Started" } else { "Continue" }
}
