//! Session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate sign-in
//! redirects and identity-dependent rendering.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
}

impl SessionState {
    /// State before the first `/api/auth/me` round trip has finished.
    #[must_use]
    pub fn pending() -> Self {
        Self { user: None, loading: true }
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Whether a guarded page should send the visitor to `/auth`.
#[must_use]
pub fn should_redirect_unauth(state: &SessionState) -> bool {
    !state.loading && state.user.is_none()
}
