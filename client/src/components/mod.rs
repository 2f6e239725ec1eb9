//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and shared widgets while reading/writing
//! preference and session state from Leptos context providers.

pub mod accessibility_tools;
pub mod achievement_badges;
pub mod leaderboard;
pub mod nav_bar;
pub mod voice_guidance;
pub mod workout_card;
