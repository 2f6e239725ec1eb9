//! Landing route: sends the visitor to onboarding or the dashboard.

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::preferences::use_preferences;

#[component]
pub fn IndexPage() -> impl IntoView {
    let prefs = use_preferences();
    let navigate = use_navigate();

    // Runs after hydration so the onboarding flag is read from the browser store.
    Effect::new(move || {
        prefs.onboarding.mount();
        let target = landing_route(prefs.is_onboarded());
        navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
    });

    view! {
        <div class="splash">
            <h1 class="splash__title">"Gentle Motion"</h1>
            <p>"Loading..."</p>
        </div>
    }
}

/// Where `/` leads for a visitor with the given onboarding state.
pub fn landing_route(onboarded: bool) -> &'static str {
    if onboarded { "/dashboard" } else { "/onboarding" }
}
