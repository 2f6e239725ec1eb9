//! Leptos signal bridges over preference concerns.
//!
//! DESIGN
//! ======
//! The concern stays the source of truth. A bridge mirrors it into a signal
//! so views re-render, and all writes still go through the concern so they
//! are persisted and presented exactly once.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use leptos::prelude::*;
use prefs::{Preference, PreferenceConcern, PreferenceContext, Presentable};

/// The application's preference context, provided by `App`.
#[must_use]
pub fn use_preferences() -> PreferenceContext {
    expect_context::<PreferenceContext>()
}

/// Mirror a concern into a read-only signal for the current reactive owner.
///
/// The observer is removed when the owner is cleaned up.
pub fn concern_signal<P>(concern: &PreferenceConcern<P>) -> ReadSignal<P>
where
    P: Preference + Presentable,
{
    let signal = RwSignal::new(concern.current());
    let subscription = concern.subscribe(move |value: &P| {
        let _ = signal.try_set(value.clone());
    });
    on_cleanup(move || drop(subscription));
    signal.read_only()
}

/// Log a failed write-through and turn it into a short notice for the UI.
#[must_use]
pub fn save_notice(result: Result<(), prefs::StoreError>) -> Option<String> {
    match result {
        Ok(()) => None,
        Err(err) => {
            log::warn!("preference not saved: {err}");
            Some("Your change is applied but could not be saved on this device.".to_owned())
        }
    }
}
