//! Durable preference store seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser this is `localStorage`: flat, origin-scoped, string keys to
//! string values, synchronous, single writer per tab. There are no
//! transactions; a record spread over two keys can be left half-written.
//! Callers tolerate that because each key decodes on its own.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Storage keys used by the preference concerns.
pub mod keys {
    pub const ACCESSIBILITY: &str = "accessibilitySettings";
    pub const THEME: &str = "theme";
    pub const CONTRAST: &str = "contrast";
    pub const USER_PREFERENCES: &str = "userPreferences";
    pub const USER: &str = "user";
    pub const ONBOARDED: &str = "onboarded";
}

/// Errors from writing to a preference store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The write would exceed the store's capacity.
    #[error("storage quota exceeded writing {key}")]
    QuotaExceeded { key: String },

    /// The backing storage could not be reached (disabled, private mode, SSR).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Flat string key/value store that survives reloads.
pub trait PreferenceStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store used for tests, SSR, and environments without storage.
///
/// An optional byte quota (sum of key and value lengths) models the browser's
/// quota-exceeded failure.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once keys plus values exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self { entries: Mutex::default(), quota_bytes: Some(bytes) }
    }

    /// Store pre-seeded with `entries`, as if left behind by an earlier session.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { entries: Mutex::new(map), quota_bytes: None }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every entry, like a user clearing site data.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.lock();
        if let Some(quota) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > quota {
                return Err(StoreError::QuotaExceeded { key: key.to_owned() });
            }
        }
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
