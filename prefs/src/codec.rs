//! Preference codec: records to and from their stored string form.
//!
//! DESIGN
//! ======
//! Encoding is deterministic JSON (or a bare word for single-valued keys).
//! Decoding never fails. Each field is read on its own and replaced by its
//! default when it is missing or has the wrong shape, so one corrupted field
//! never costs the user the others. `serde_json` runs with
//! `arbitrary_precision`, so a number too large for `f64` still parses and
//! only its own field falls back.
//!
//! Older builds wrote `fontSize` and `contrast` inside
//! `accessibilitySettings`; those names are still read.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use std::collections::BTreeSet;

use serde_json::{Map, Value, json};

use crate::records::{
    AccessibilityPreferences, Contrast, FONT_SIZE_DEFAULT, NotificationPreferences, OnboardingProfile, Theme,
    ThemePreferences, is_valid_font_size, snap_font_size,
};
use crate::store::{PreferenceStore, StoreError, keys};

/// A record that can be loaded from and saved to a [`PreferenceStore`].
pub trait Preference: Clone + PartialEq + Default + Send + Sync + 'static {
    /// Concern name used in log events.
    const CONCERN: &'static str;

    /// Read and decode the record. Absent or malformed data yields defaults.
    fn load(store: &dyn PreferenceStore) -> Self;

    /// Encode and write the record.
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] hit. Records spanning several keys
    /// may be left partially written.
    fn save(&self, store: &dyn PreferenceStore) -> Result<(), StoreError>;

    /// Restore invariants after an update merged `next` over `previous`.
    #[must_use]
    fn normalize(previous: &Self, next: Self) -> Self {
        let _ = previous;
        next
    }
}

// =============================================================================
// FIELD READER
// =============================================================================

/// Field-by-field view over a stored JSON object.
struct Fields {
    concern: &'static str,
    map: Option<Map<String, Value>>,
}

impl Fields {
    fn parse(concern: &'static str, raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self { concern, map: None };
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Self { concern, map: Some(map) },
            Ok(_) => {
                tracing::debug!(concern, "stored preference is not an object; using defaults");
                Self { concern, map: None }
            }
            Err(e) => {
                tracing::debug!(concern, error = %e, "malformed stored preference; using defaults");
                Self { concern, map: None }
            }
        }
    }

    /// First present value among `names` (canonical name first, then legacy aliases).
    fn lookup(&self, names: &[&'static str]) -> Option<(&'static str, &Value)> {
        let map = self.map.as_ref()?;
        names
            .iter()
            .find_map(|name| map.get(*name).map(|v| (*name, v)))
    }

    fn fallback(&self, field: &'static str) {
        tracing::debug!(concern = self.concern, field, "invalid stored field; using default");
    }

    fn bool(&self, names: &[&'static str], default: bool) -> bool {
        match self.lookup(names) {
            Some((_, Value::Bool(b))) => *b,
            Some((field, _)) => {
                self.fallback(field);
                default
            }
            None => default,
        }
    }

    fn integer(&self, names: &[&'static str], accept: impl Fn(i64) -> bool, default: i64) -> i64 {
        let Some((field, value)) = self.lookup(names) else {
            return default;
        };
        match as_integer(value) {
            Some(n) if accept(n) => n,
            _ => {
                self.fallback(field);
                default
            }
        }
    }

    fn string(&self, names: &[&'static str]) -> String {
        match self.lookup(names) {
            Some((_, Value::String(s))) => s.clone(),
            Some((_, Value::Number(n))) => n.to_string(),
            Some((field, _)) => {
                self.fallback(field);
                String::new()
            }
            None => String::new(),
        }
    }

    fn string_set(&self, names: &[&'static str]) -> BTreeSet<String> {
        match self.lookup(names) {
            Some((_, Value::Array(items))) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect(),
            Some((field, _)) => {
                self.fallback(field);
                BTreeSet::new()
            }
            None => BTreeSet::new(),
        }
    }
}

/// Integers may arrive as `150` or `150.0`; anything fractional is rejected.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() != 0.0 || !f.is_finite() || f.abs() > 1e15 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(f as i64)
}

/// Decode a single-word value written either bare (`dark`) or as JSON (`"dark"`).
fn bare_word(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.starts_with('"') {
        serde_json::from_str::<String>(raw).ok()
    } else {
        Some(raw.to_owned())
    }
}

// =============================================================================
// ACCESSIBILITY
// =============================================================================

impl AccessibilityPreferences {
    #[must_use]
    pub fn encode(&self) -> String {
        json!({
            "fontSizePercent": self.font_size_percent,
            "highContrast": self.high_contrast,
            "reducedMotion": self.reduced_motion,
            "voiceAssistant": self.voice_assistant,
            "textToSpeech": self.text_to_speech,
        })
        .to_string()
    }

    #[must_use]
    pub fn decode(raw: Option<&str>) -> Self {
        let fields = Fields::parse(Self::CONCERN, raw);
        let font = fields.integer(
            &["fontSizePercent", "fontSize"],
            is_valid_font_size,
            i64::from(FONT_SIZE_DEFAULT),
        );
        Self {
            font_size_percent: u16::try_from(font).unwrap_or(FONT_SIZE_DEFAULT),
            high_contrast: fields.bool(&["highContrast", "contrast"], false),
            reduced_motion: fields.bool(&["reducedMotion"], false),
            voice_assistant: fields.bool(&["voiceAssistant"], false),
            text_to_speech: fields.bool(&["textToSpeech"], false),
        }
    }
}

impl Preference for AccessibilityPreferences {
    const CONCERN: &'static str = "accessibility";

    fn load(store: &dyn PreferenceStore) -> Self {
        Self::decode(store.get(keys::ACCESSIBILITY).as_deref())
    }

    fn save(&self, store: &dyn PreferenceStore) -> Result<(), StoreError> {
        store.set(keys::ACCESSIBILITY, &self.encode())
    }

    fn normalize(_previous: &Self, mut next: Self) -> Self {
        next.font_size_percent = snap_font_size(i64::from(next.font_size_percent));
        next
    }
}

// =============================================================================
// THEME
// =============================================================================

impl Theme {
    #[must_use]
    pub fn decode(raw: Option<&str>) -> Option<Self> {
        bare_word(raw).and_then(|w| Self::parse(&w))
    }
}

impl Contrast {
    #[must_use]
    pub fn decode(raw: Option<&str>) -> Option<Self> {
        bare_word(raw).and_then(|w| Self::parse(&w))
    }
}

impl Preference for ThemePreferences {
    const CONCERN: &'static str = "theme";

    fn load(store: &dyn PreferenceStore) -> Self {
        let theme = Theme::decode(store.get(keys::THEME).as_deref()).unwrap_or_else(|| {
            // Settings pages used to keep their own dark-mode flag; honor it
            // until the theme key has been written once.
            match NotificationPreferences::legacy_dark_mode(store.get(keys::USER_PREFERENCES).as_deref()) {
                Some(true) => Theme::Dark,
                _ => Theme::default(),
            }
        });
        let contrast = Contrast::decode(store.get(keys::CONTRAST).as_deref()).unwrap_or_default();
        Self { theme, contrast }
    }

    fn save(&self, store: &dyn PreferenceStore) -> Result<(), StoreError> {
        store.set(keys::THEME, self.theme.as_str())?;
        store.set(keys::CONTRAST, self.contrast.as_str())
    }
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

impl NotificationPreferences {
    #[must_use]
    pub fn encode(&self) -> String {
        json!({
            "reminders": self.reminders,
            "emails": self.emails,
            "achievements": self.achievements,
        })
        .to_string()
    }

    #[must_use]
    pub fn decode(raw: Option<&str>) -> Self {
        let fields = Fields::parse(Self::CONCERN, raw);
        let defaults = Self::default();
        Self {
            reminders: fields.bool(&["reminders"], defaults.reminders),
            emails: fields.bool(&["emails"], defaults.emails),
            achievements: fields.bool(&["achievements"], defaults.achievements),
        }
    }

    /// The `darkMode` flag older settings pages stored alongside notifications.
    #[must_use]
    pub fn legacy_dark_mode(raw: Option<&str>) -> Option<bool> {
        let fields = Fields::parse(Self::CONCERN, raw);
        fields
            .lookup(&["darkMode"])
            .and_then(|(_, v)| v.as_bool())
    }
}

impl Preference for NotificationPreferences {
    const CONCERN: &'static str = "notifications";

    fn load(store: &dyn PreferenceStore) -> Self {
        Self::decode(store.get(keys::USER_PREFERENCES).as_deref())
    }

    fn save(&self, store: &dyn PreferenceStore) -> Result<(), StoreError> {
        store.set(keys::USER_PREFERENCES, &self.encode())
    }
}

// =============================================================================
// ONBOARDING
// =============================================================================

impl OnboardingProfile {
    /// Encode the display fields stored under `user`. Completion lives under `onboarded`.
    #[must_use]
    pub fn encode(&self) -> String {
        json!({
            "name": self.name,
            "age": self.age,
            "goals": self.goals,
        })
        .to_string()
    }

    #[must_use]
    pub fn decode(user: Option<&str>, onboarded: Option<&str>) -> Self {
        let fields = Fields::parse(Self::CONCERN, user);
        Self {
            name: fields.string(&["name"]),
            age: fields.string(&["age"]),
            goals: fields.string_set(&["goals"]),
            completed: decode_flag(onboarded),
        }
    }
}

/// `"true"` (bare or quoted) is the only value that reads as set.
#[must_use]
pub fn decode_flag(raw: Option<&str>) -> bool {
    bare_word(raw).is_some_and(|w| w == "true")
}

impl Preference for OnboardingProfile {
    const CONCERN: &'static str = "onboarding";

    fn load(store: &dyn PreferenceStore) -> Self {
        Self::decode(store.get(keys::USER).as_deref(), store.get(keys::ONBOARDED).as_deref())
    }

    fn save(&self, store: &dyn PreferenceStore) -> Result<(), StoreError> {
        store.set(keys::USER, &self.encode())?;
        if self.completed {
            store.set(keys::ONBOARDED, "true")?;
        }
        Ok(())
    }

    fn normalize(previous: &Self, mut next: Self) -> Self {
        next.completed |= previous.completed;
        next
    }
}
