//! Bottom navigation with the theme toggle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Present on every signed-in page. The toggle writes through the theme
//! concern, which owns dark mode for the whole app.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use prefs::Theme;

use crate::components::accessibility_tools::AccessibilityTools;
use crate::state::preferences::{concern_signal, save_notice, use_preferences};

const NAV_ITEMS: [(&str, &str); 4] = [
    ("Home", "/dashboard"),
    ("Workouts", "/workouts"),
    ("Schedule", "/schedule"),
    ("Settings", "/settings"),
];

#[component]
pub fn NavBar() -> impl IntoView {
    let prefs = use_preferences();
    let theme = concern_signal(&prefs.theme);
    let pathname = use_location().pathname;

    let on_toggle_theme = move |_| {
        let result = prefs.toggle_theme().map(|_| ());
        if let Some(notice) = save_notice(result) {
            log::info!("{notice}");
        }
    };

    view! {
        <nav class="nav-bar">
            {NAV_ITEMS
                .into_iter()
                .map(|(label, href)| {
                    let class = move || {
                        if nav_item_active(&pathname.get(), href) {
                            "nav-bar__item nav-bar__item--active"
                        } else {
                            "nav-bar__item"
                        }
                    };
                    view! {
                        <a href=href class=class>
                            {label}
                        </a>
                    }
                })
                .collect_view()}
            <button
                class="nav-bar__item nav-bar__theme"
                aria-label=move || theme_toggle_label(theme.get().theme)
                on:click=on_toggle_theme
            >
                {move || theme_toggle_label(theme.get().theme)}
            </button>
            <AccessibilityTools />
        </nav>
    }
}

/// `/workouts` stays active for nested detail routes; other items match exactly.
fn nav_item_active(pathname: &str, href: &str) -> bool {
    if href == "/workouts" { pathname.starts_with(href) } else { pathname == href }
}

fn theme_toggle_label(current: Theme) -> &'static str {
    match current {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    }
}
