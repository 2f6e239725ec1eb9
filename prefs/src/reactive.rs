//! Reactive preference state.
//!
//! DESIGN
//! ======
//! One `PreferenceState<P>` per concern. `update` merges a change, restores
//! the record's invariants, writes it through to the store, and notifies
//! observers, all before returning. Observers are called outside of the
//! internal locks so they may read `current()` or subscribe again.
//!
//! ERROR HANDLING
//! ==============
//! A failed store write does not roll back the in-memory value: the session
//! keeps behaving as the user asked, and the error is handed back as a notice.

#[cfg(test)]
#[path = "reactive_test.rs"]
mod reactive_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use crate::codec::Preference;
use crate::store::{PreferenceStore, StoreError};

type Observer<P> = Arc<dyn Fn(&P) + Send + Sync>;

/// Observable, write-through holder for one preference record.
pub struct PreferenceState<P: Preference> {
    inner: Arc<StateInner<P>>,
}

impl<P: Preference> Clone for PreferenceState<P> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

struct StateInner<P> {
    store: Arc<dyn PreferenceStore>,
    value: RwLock<P>,
    observers: Mutex<Vec<(u64, Observer<P>)>>,
    next_id: AtomicU64,
}

impl<P: Preference> PreferenceState<P> {
    /// Holder initialized with the record's defaults. Nothing is read yet.
    #[must_use]
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            inner: Arc::new(StateInner {
                store,
                value: RwLock::new(P::default()),
                observers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Snapshot of the current record.
    #[must_use]
    pub fn current(&self) -> P {
        self.read().clone()
    }

    /// Borrow the current record without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(&self.read())
    }

    /// Apply `mutate` to a copy of the record and commit the result.
    ///
    /// A change that normalizes back to the current value is not written
    /// and does not notify.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the write-through fails. The new value
    /// is kept in memory and observers have already been notified.
    pub fn update(&self, mutate: impl FnOnce(&mut P)) -> Result<(), StoreError> {
        let next = {
            let mut value = self.write();
            let mut draft = value.clone();
            mutate(&mut draft);
            let next = P::normalize(&value, draft);
            if next == *value {
                return Ok(());
            }
            *value = next.clone();
            next
        };

        let persisted = next.save(self.inner.store.as_ref());
        if let Err(e) = &persisted {
            tracing::warn!(concern = P::CONCERN, error = %e, "preference write failed; keeping in-memory value");
        }
        self.notify(&next);
        persisted
    }

    /// Register `observer`; it runs after every committed change until the
    /// returned [`Subscription`] is dropped.
    pub fn subscribe(&self, observer: impl Fn(&P) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.observers().push((id, Arc::new(observer)));
        let owner: Weak<dyn Unsubscribe> = Arc::downgrade(&self.inner) as Weak<dyn Unsubscribe>;
        Subscription { id, owner }
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers().len()
    }

    pub(crate) fn store(&self) -> &dyn PreferenceStore {
        self.inner.store.as_ref()
    }

    /// Replace the record without writing it back, then notify.
    pub(crate) fn seed(&self, value: P) {
        *self.write() = value.clone();
        self.notify(&value);
    }

    fn notify(&self, value: &P) {
        let observers: Vec<Observer<P>> = self
            .observers()
            .iter()
            .map(|(_, o)| Arc::clone(o))
            .collect();
        for observer in observers {
            observer(value);
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, P> {
        self.inner.value.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, P> {
        self.inner.value.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn observers(&self) -> std::sync::MutexGuard<'_, Vec<(u64, Observer<P>)>> {
        self.inner.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, id: u64);
}

impl<P: Preference> Unsubscribe for StateInner<P> {
    fn unsubscribe(&self, id: u64) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(oid, _)| *oid != id);
    }
}

struct Detached;

impl Unsubscribe for Detached {
    fn unsubscribe(&self, _id: u64) {}
}

/// Handle that keeps an observer registered. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    owner: Weak<dyn Unsubscribe>,
}

impl Subscription {
    /// Keep the observer registered for the lifetime of the state.
    pub fn detach(mut self) {
        let detached: Weak<dyn Unsubscribe> = Weak::<Detached>::new();
        self.owner = detached;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(owner) = self.owner.upgrade() {
            owner.unsubscribe(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish_non_exhaustive()
    }
}
