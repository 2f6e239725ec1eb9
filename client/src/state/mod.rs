//! Client-side reactive state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` tracks the signed-in user; `preferences` bridges the
//! `prefs` concerns into Leptos signals; `schedule` holds the planned
//! sessions kept on this device.

pub mod preferences;
pub mod schedule;
pub mod session;
