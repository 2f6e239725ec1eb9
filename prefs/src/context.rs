//! Application-wide preference context.
//!
//! DESIGN
//! ======
//! Built once at application start from a store and a presentation surface,
//! then handed to every consumer by reference (Leptos context on the client).
//! It is the single owner of each concern; in particular the theme concern is
//! the only holder of dark mode, and settings surfaces write through it.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::sync::Arc;

use crate::bootstrap::PreferenceConcern;
use crate::onboarding::{OnboardingFlow, has_completed_onboarding};
use crate::presentation::PresentationSurface;
use crate::records::{
    AccessibilityPreferences, Contrast, NotificationPreferences, OnboardingProfile, Theme, ThemePreferences,
};
use crate::store::{PreferenceStore, StoreError};

#[derive(Clone)]
pub struct PreferenceContext {
    store: Arc<dyn PreferenceStore>,
    pub accessibility: PreferenceConcern<AccessibilityPreferences>,
    pub theme: PreferenceConcern<ThemePreferences>,
    pub notifications: PreferenceConcern<NotificationPreferences>,
    pub onboarding: PreferenceConcern<OnboardingProfile>,
}

impl PreferenceContext {
    #[must_use]
    pub fn new(store: Arc<dyn PreferenceStore>, surface: Arc<dyn PresentationSurface>) -> Self {
        Self {
            accessibility: PreferenceConcern::new(Arc::clone(&store), Arc::clone(&surface)),
            theme: PreferenceConcern::new(Arc::clone(&store), Arc::clone(&surface)),
            notifications: PreferenceConcern::new(Arc::clone(&store), Arc::clone(&surface)),
            onboarding: PreferenceConcern::new(Arc::clone(&store), surface),
            store,
        }
    }

    /// Rehydrate every concern that has not been mounted yet.
    pub fn mount_all(&self) {
        self.accessibility.mount();
        self.theme.mount();
        self.notifications.mount();
        self.onboarding.mount();
    }

    /// Flip light/dark and return the new theme.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails; the toggle still applies.
    pub fn toggle_theme(&self) -> Result<Theme, StoreError> {
        self.theme.update(|t| t.theme = t.theme.toggled())?;
        Ok(self.theme.current().theme)
    }

    /// Flip normal/high contrast and return the new value.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails; the toggle still applies.
    pub fn toggle_contrast(&self) -> Result<Contrast, StoreError> {
        self.theme.update(|t| t.contrast = t.contrast.toggled())?;
        Ok(self.theme.current().contrast)
    }

    /// Set dark mode from a boolean switch (settings page).
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails.
    pub fn set_dark_mode(&self, enabled: bool) -> Result<(), StoreError> {
        let theme = if enabled { Theme::Dark } else { Theme::Light };
        self.theme.update(|t| t.theme = theme)
    }

    #[must_use]
    pub fn start_onboarding(&self) -> OnboardingFlow {
        OnboardingFlow::new()
    }

    /// Commit a finished onboarding profile. Completion is sticky.
    ///
    /// # Errors
    ///
    /// Returns the store's error if persisting fails; the in-memory profile
    /// is still marked completed.
    pub fn complete_onboarding(&self, profile: OnboardingProfile) -> Result<(), StoreError> {
        self.onboarding.update(|p| {
            *p = OnboardingProfile { completed: true, ..profile };
        })?;
        tracing::info!("onboarding completed");
        Ok(())
    }

    /// Whether onboarding has been completed, in this session or an earlier one.
    #[must_use]
    pub fn is_onboarded(&self) -> bool {
        self.onboarding.current().completed || has_completed_onboarding(self.store.as_ref())
    }
}
