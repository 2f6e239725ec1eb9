//! # prefs
//!
//! Local preference state sync for the Gentle Motion client.
//!
//! DESIGN
//! ======
//! Every user-adjustable setting cluster (accessibility, theme, notification
//! toggles, onboarding answers) is a *concern*. A concern is held in memory,
//! written through to a durable string store after each accepted change,
//! mirrored onto global presentation surfaces, and rehydrated from the store
//! once per load.
//!
//! The two side-effecting edges are traits so the browser (`localStorage`,
//! the live document) and tests/SSR (`MemoryStore`, `MemorySurface`) plug in
//! the same way:
//!
//! ```text
//!   PreferenceStore ──load──▶ PreferenceConcern ──present──▶ PresentationSurface
//!          ▲                        │ update
//!          └──────save──────────────┘
//! ```
//!
//! Everything here is synchronous; suspension points belong to the UI
//! framework driving it.

pub mod bootstrap;
pub mod codec;
pub mod context;
pub mod onboarding;
pub mod presentation;
pub mod reactive;
pub mod records;
pub mod store;

pub use bootstrap::{Phase, PreferenceConcern};
pub use codec::Preference;
pub use context::PreferenceContext;
pub use onboarding::{Advance, OnboardingError, OnboardingFlow, OnboardingStep};
pub use presentation::{Element, MemorySurface, Presentable, PresentationSnapshot, PresentationSurface};
pub use reactive::{PreferenceState, Subscription};
pub use records::{
    AccessibilityPreferences, Contrast, NotificationPreferences, OnboardingProfile, Theme, ThemePreferences,
};
pub use store::{MemoryStore, PreferenceStore, StoreError};
