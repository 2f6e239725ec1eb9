//! Rehydration bootstrapper.
//!
//! DESIGN
//! ======
//! A concern starts `Uninitialized` holding defaults. The first `mount()`
//! reads the store, seeds the state, applies it to the presentation surface
//! once, and leaves the surface subscribed so later updates re-apply. The
//! transition happens once per concern; there is no way back.
//!
//! An `update` on a concern that was never mounted mounts it first, so stored
//! values are always loaded before a user change can overwrite them.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::codec::Preference;
use crate::presentation::{Presentable, PresentationSurface, apply};
use crate::reactive::{PreferenceState, Subscription};
use crate::store::{PreferenceStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initialized,
}

#[derive(Debug)]
struct Mount {
    phase: Phase,
    applier: Option<Subscription>,
}

/// A preference concern: reactive state bound to a store and a presentation surface.
pub struct PreferenceConcern<P: Preference + Presentable> {
    state: PreferenceState<P>,
    surface: Arc<dyn PresentationSurface>,
    mount: Arc<Mutex<Mount>>,
}

impl<P: Preference + Presentable> Clone for PreferenceConcern<P> {
    fn clone(&self) -> Self {
        Self { state: self.state.clone(), surface: Arc::clone(&self.surface), mount: Arc::clone(&self.mount) }
    }
}

impl<P: Preference + Presentable> PreferenceConcern<P> {
    #[must_use]
    pub fn new(store: Arc<dyn PreferenceStore>, surface: Arc<dyn PresentationSurface>) -> Self {
        Self {
            state: PreferenceState::new(store),
            surface,
            mount: Arc::new(Mutex::new(Mount { phase: Phase::Uninitialized, applier: None })),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    /// Rehydrate from the store. Returns `false` if already mounted.
    pub fn mount(&self) -> bool {
        {
            let mut mount = self.lock();
            if mount.phase == Phase::Initialized {
                return false;
            }
            mount.phase = Phase::Initialized;
        }

        let loaded = P::load(self.state.store());
        self.state.seed(loaded);
        self.state.with(|p| apply(p, self.surface.as_ref()));

        let surface = Arc::clone(&self.surface);
        let applier = self.state.subscribe(move |p: &P| apply(p, surface.as_ref()));
        self.lock().applier = Some(applier);

        tracing::debug!(concern = P::CONCERN, "preference concern rehydrated");
        true
    }

    /// Snapshot of the current record.
    #[must_use]
    pub fn current(&self) -> P {
        self.state.current()
    }

    /// Mount if needed, then update. See [`PreferenceState::update`].
    ///
    /// # Errors
    ///
    /// Returns the store's error when the write-through fails; the in-memory
    /// value and the presentation surface still reflect the change.
    pub fn update(&self, mutate: impl FnOnce(&mut P)) -> Result<(), StoreError> {
        self.mount();
        self.state.update(mutate)
    }

    /// Observe committed changes, including the rehydration seed.
    pub fn subscribe(&self, observer: impl Fn(&P) + Send + Sync + 'static) -> Subscription {
        self.state.subscribe(observer)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Mount> {
        self.mount.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
