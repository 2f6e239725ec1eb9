//! Browser `localStorage` adapter for the preference store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes hydrate-only storage glue so preference concerns never touch
//! web-sys directly. SSR paths get an in-memory store to keep server rendering
//! deterministic.
//!
//! TRADE-OFFS
//! ==========
//! Storage is looked up on every call instead of cached, because
//! `web_sys::Storage` is not `Send` and the store is shared through Leptos
//! context.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::sync::Arc;

#[cfg(not(feature = "hydrate"))]
use prefs::MemoryStore;
use prefs::{PreferenceStore, StoreError};

/// Preference store backed by `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
            storage.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;

            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_owned()))?;
            storage.set_item(key, value).map_err(|err| {
                match err.dyn_ref::<web_sys::DomException>() {
                    Some(ex) if ex.name() == "QuotaExceededError" => StoreError::QuotaExceeded { key: key.to_owned() },
                    Some(ex) => StoreError::Unavailable(ex.message()),
                    None => StoreError::Unavailable(format!("{err:?}")),
                }
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(StoreError::Unavailable("no browser storage outside hydrate".to_owned()))
        }
    }
}

/// Store for the current environment: `localStorage` in the browser, memory on the server.
#[must_use]
pub fn browser_store() -> Arc<dyn PreferenceStore> {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(LocalStorageStore)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(MemoryStore::new())
    }
}
