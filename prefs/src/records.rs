//! Preference records, one per concern.
//!
//! DESIGN
//! ======
//! Records are plain values with hardcoded defaults. Invariants that the UI
//! can violate (font scale range, onboarding completion) are restored by
//! [`crate::codec::Preference::normalize`] on every update, so holders never
//! observe an invalid record.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use std::collections::BTreeSet;

pub const FONT_SIZE_MIN: u16 = 75;
pub const FONT_SIZE_MAX: u16 = 200;
pub const FONT_SIZE_STEP: u16 = 5;
pub const FONT_SIZE_DEFAULT: u16 = 100;

/// Whether `value` is an accepted font scale: inside the range and on the step grid.
#[must_use]
pub fn is_valid_font_size(value: i64) -> bool {
    (i64::from(FONT_SIZE_MIN)..=i64::from(FONT_SIZE_MAX)).contains(&value) && value % i64::from(FONT_SIZE_STEP) == 0
}

/// Clamp into range and round to the nearest step (ties round up).
#[must_use]
pub fn snap_font_size(value: i64) -> u16 {
    let min = i64::from(FONT_SIZE_MIN);
    let max = i64::from(FONT_SIZE_MAX);
    let step = i64::from(FONT_SIZE_STEP);
    let clamped = value.clamp(min, max);
    let snapped = min + ((clamped - min) + step / 2) / step * step;
    // Range was clamped above, so this always fits.
    u16::try_from(snapped.min(max)).unwrap_or(FONT_SIZE_DEFAULT)
}

// =============================================================================
// ACCESSIBILITY
// =============================================================================

/// Settings from the accessibility drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessibilityPreferences {
    /// Root font scale in percent, 75..=200 in steps of 5.
    pub font_size_percent: u16,
    pub high_contrast: bool,
    pub reduced_motion: bool,
    pub voice_assistant: bool,
    pub text_to_speech: bool,
}

impl Default for AccessibilityPreferences {
    fn default() -> Self {
        Self {
            font_size_percent: FONT_SIZE_DEFAULT,
            high_contrast: false,
            reduced_motion: false,
            voice_assistant: false,
            text_to_speech: false,
        }
    }
}

// =============================================================================
// THEME
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Contrast {
    #[default]
    Normal,
    High,
}

impl Contrast {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "normal" => Some(Self::Normal),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::High,
            Self::High => Self::Normal,
        }
    }
}

/// Visual theme. Sole owner of the dark-mode setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemePreferences {
    pub theme: Theme,
    pub contrast: Contrast,
}

impl ThemePreferences {
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// Notification toggles from the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPreferences {
    pub reminders: bool,
    pub emails: bool,
    pub achievements: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self { reminders: true, emails: true, achievements: true }
    }
}

// =============================================================================
// ONBOARDING
// =============================================================================

/// Answers collected by the onboarding flow plus its completion flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingProfile {
    pub name: String,
    /// Kept as entered; the form does not coerce it to a number.
    pub age: String,
    pub goals: BTreeSet<String>,
    /// Set once when the last step completes. Never cleared.
    pub completed: bool,
}

impl OnboardingProfile {
    /// Name to greet the user with, falling back when onboarding was skipped.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() { "Friend" } else { trimmed }
    }
}
