//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};
use prefs::PreferenceContext;

use crate::pages::{
    auth::AuthPage, dashboard::DashboardPage, index::IndexPage, onboarding::OnboardingPage,
    schedule::SchedulePage, settings::SettingsPage, workout_detail::WorkoutDetailPage, workouts::WorkoutsPage,
};
use crate::state::session::SessionState;
use crate::util::{document::browser_surface, storage::browser_store};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the preference context once from the environment's store and
/// presentation surface, provides it with the session signal, and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let prefs = PreferenceContext::new(browser_store(), browser_surface());
    let session = RwSignal::new(SessionState::pending());

    provide_context(prefs.clone());
    provide_context(session);

    // Rehydrate every concern after first render, before user input.
    Effect::new(move || prefs.mount_all());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_current_user().await;
        session.set(SessionState { user, loading: false });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/gentle-motion.css"/>
        <Title text="Gentle Motion"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=IndexPage/>
                <Route path=StaticSegment("onboarding") view=OnboardingPage/>
                <Route path=StaticSegment("auth") view=AuthPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("workouts") view=WorkoutsPage/>
                <Route path=(StaticSegment("workouts"), ParamSegment("id")) view=WorkoutDetailPage/>
                <Route path=StaticSegment("schedule") view=SchedulePage/>
                <Route path=StaticSegment("settings") view=SettingsPage/>
            </Routes>
        </Router>
    }
}
