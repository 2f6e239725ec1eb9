//! Presentation effect applier.
//!
//! DESIGN
//! ======
//! Each record maps every field to exactly one set-style action on a
//! [`PresentationSurface`], or to nothing. Set-style actions make `apply`
//! idempotent: applying the same record twice leaves the surface unchanged.
//!
//! The accessibility drawer marks `<body>` while the theme marks `<html>`,
//! so the two concerns never fight over the same class.

#[cfg(test)]
#[path = "presentation_test.rs"]
mod presentation_test;

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use crate::records::{AccessibilityPreferences, Contrast, NotificationPreferences, OnboardingProfile, ThemePreferences};

pub const HIGH_CONTRAST_CLASS: &str = "high-contrast";
pub const DARK_CLASS: &str = "dark";

/// Document element a presentation class is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    /// The `<html>` element.
    Root,
    /// The `<body>` element.
    Body,
}

/// Global, side-effecting presentation target.
pub trait PresentationSurface: Send + Sync {
    /// Set the root font scale, in percent.
    fn set_root_font_scale(&self, percent: u16);

    /// Add (`enabled`) or remove a class on `element`.
    fn set_class(&self, element: Element, class: &'static str, enabled: bool);
}

/// A record with a presentation consequence.
pub trait Presentable {
    fn present(&self, surface: &dyn PresentationSurface);
}

/// Apply `record` to `surface`. Safe to call repeatedly.
pub fn apply<P: Presentable + ?Sized>(record: &P, surface: &dyn PresentationSurface) {
    record.present(surface);
}

impl Presentable for AccessibilityPreferences {
    fn present(&self, surface: &dyn PresentationSurface) {
        surface.set_root_font_scale(self.font_size_percent);
        surface.set_class(Element::Body, HIGH_CONTRAST_CLASS, self.high_contrast);
        // reduced_motion, voice_assistant and text_to_speech are stored only.
    }
}

impl Presentable for ThemePreferences {
    fn present(&self, surface: &dyn PresentationSurface) {
        surface.set_class(Element::Root, DARK_CLASS, self.is_dark());
        surface.set_class(Element::Root, HIGH_CONTRAST_CLASS, self.contrast == Contrast::High);
    }
}

impl Presentable for NotificationPreferences {
    fn present(&self, _surface: &dyn PresentationSurface) {}
}

impl Presentable for OnboardingProfile {
    fn present(&self, _surface: &dyn PresentationSurface) {}
}

// =============================================================================
// MEMORY SURFACE
// =============================================================================

/// Observable presentation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationSnapshot {
    /// `None` until a font scale has been applied.
    pub root_font_scale: Option<u16>,
    pub classes: BTreeSet<(Element, &'static str)>,
}

/// Surface that records presentation state instead of touching a document.
///
/// Used for SSR, where there is no live document, and in tests.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<PresentationSnapshot>,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> PresentationSnapshot {
        self.lock().clone()
    }

    #[must_use]
    pub fn has_class(&self, element: Element, class: &'static str) -> bool {
        self.lock().classes.contains(&(element, class))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PresentationSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PresentationSurface for MemorySurface {
    fn set_root_font_scale(&self, percent: u16) {
        self.lock().root_font_scale = Some(percent);
    }

    fn set_class(&self, element: Element, class: &'static str, enabled: bool) {
        let mut state = self.lock();
        if enabled {
            state.classes.insert((element, class));
        } else {
            state.classes.remove(&(element, class));
        }
    }
}
