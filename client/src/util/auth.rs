//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded pages apply identical unauthenticated redirect behavior.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::{SessionState, should_redirect_unauth};

/// Redirect to `/auth` whenever the session has loaded and no user is present.
pub fn install_unauth_redirect<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&session.get()) {
            navigate("/auth", NavigateOptions::default());
        }
    });
}
