//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod auth;
pub mod dashboard;
pub mod index;
pub mod onboarding;
pub mod schedule;
pub mod settings;
pub mod workout_detail;
pub mod workouts;
