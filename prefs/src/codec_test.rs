use super::*;
use crate::store::MemoryStore;

// =============================================================================
// accessibility
// =============================================================================

#[test]
fn font_size_round_trips_across_whole_range() {
    for v in (75..=200).step_by(5) {
        let prefs = AccessibilityPreferences { font_size_percent: v, high_contrast: v % 2 == 0, ..Default::default() };
        let decoded = AccessibilityPreferences::decode(Some(&prefs.encode()));
        assert_eq!(decoded, prefs, "round trip failed for {v}");
    }
}

#[test]
fn decode_absent_is_default() {
    assert_eq!(AccessibilityPreferences::decode(None), AccessibilityPreferences::default());
}

#[test]
fn decode_partial_record_fills_missing_fields() {
    let decoded = AccessibilityPreferences::decode(Some(r#"{"fontSizePercent":150,"contrast":true}"#));
    assert_eq!(
        decoded,
        AccessibilityPreferences {
            font_size_percent: 150,
            high_contrast: true,
            reduced_motion: false,
            voice_assistant: false,
            text_to_speech: false,
        }
    );
}

#[test]
fn decode_reads_legacy_font_size_name() {
    let decoded = AccessibilityPreferences::decode(Some(r#"{"fontSize":125,"reducedMotion":true}"#));
    assert_eq!(decoded.font_size_percent, 125);
    assert!(decoded.reduced_motion);
}

#[test]
fn decode_out_of_range_font_size_falls_back_to_100() {
    for raw in [
        r#"{"fontSizePercent":0}"#,
        r#"{"fontSizePercent":300}"#,
        r#"{"fontSizePercent":-5}"#,
        r#"{"fontSizePercent":101}"#,
        r#"{"fontSizePercent":"150"}"#,
        r#"{"fontSizePercent":150.5}"#,
        r#"{"fontSizePercent":null}"#,
    ] {
        assert_eq!(AccessibilityPreferences::decode(Some(raw)).font_size_percent, 100, "input {raw}");
    }
}

#[test]
fn decode_accepts_integral_float_font_size() {
    let decoded = AccessibilityPreferences::decode(Some(r#"{"fontSizePercent":175.0}"#));
    assert_eq!(decoded.font_size_percent, 175);
}

#[test]
fn decode_bad_field_does_not_poison_others() {
    let decoded =
        AccessibilityPreferences::decode(Some(r#"{"fontSizePercent":"huge","highContrast":"yes","textToSpeech":true}"#));
    assert_eq!(decoded.font_size_percent, 100);
    assert!(!decoded.high_contrast);
    assert!(decoded.text_to_speech);
}

#[test]
fn decode_overflowing_number_only_resets_its_own_field() {
    for raw in [
        r#"{"fontSizePercent":1e999,"highContrast":true,"reducedMotion":true}"#,
        r#"{"fontSizePercent":-1e999,"highContrast":true,"reducedMotion":true}"#,
        r#"{"fontSizePercent":123456789012345678901234567890,"highContrast":true,"reducedMotion":true}"#,
    ] {
        let decoded = AccessibilityPreferences::decode(Some(raw));
        assert_eq!(decoded.font_size_percent, 100, "input {raw}");
        assert!(decoded.high_contrast, "input {raw}");
        assert!(decoded.reduced_motion, "input {raw}");
    }
}

#[test]
fn decode_malformed_input_never_panics_and_yields_defaults() {
    for raw in ["", "{", "null", "42", "[1,2,3]", "\"text\"", "{\"fontSizePercent\":", "\u{0}\u{1}"] {
        assert_eq!(
            AccessibilityPreferences::decode(Some(raw)),
            AccessibilityPreferences::default(),
            "input {raw:?}"
        );
    }
}

#[test]
fn encode_is_deterministic() {
    let prefs = AccessibilityPreferences { font_size_percent: 120, voice_assistant: true, ..Default::default() };
    assert_eq!(prefs.encode(), prefs.encode());
    let value: serde_json::Value = serde_json::from_str(&prefs.encode()).unwrap();
    assert_eq!(value["fontSizePercent"], 120);
    assert_eq!(value["voiceAssistant"], true);
}

#[test]
fn accessibility_normalize_snaps_font_size() {
    let prev = AccessibilityPreferences::default();
    let next = AccessibilityPreferences { font_size_percent: 500, ..prev };
    assert_eq!(AccessibilityPreferences::normalize(&prev, next).font_size_percent, 200);
}

// =============================================================================
// theme
// =============================================================================

#[test]
fn theme_decode_accepts_bare_and_quoted_words() {
    assert_eq!(Theme::decode(Some("dark")), Some(Theme::Dark));
    assert_eq!(Theme::decode(Some("\"dark\"")), Some(Theme::Dark));
    assert_eq!(Theme::decode(Some(" light ")), Some(Theme::Light));
    assert_eq!(Theme::decode(Some("purple")), None);
    assert_eq!(Theme::decode(None), None);
    assert_eq!(Contrast::decode(Some("\"high\"")), Some(Contrast::High));
}

#[test]
fn theme_load_uses_defaults_for_empty_store() {
    let store = MemoryStore::new();
    assert_eq!(ThemePreferences::load(&store), ThemePreferences::default());
}

#[test]
fn theme_save_then_load_round_trips() {
    let store = MemoryStore::new();
    let prefs = ThemePreferences { theme: Theme::Dark, contrast: Contrast::High };
    prefs.save(&store).unwrap();
    assert_eq!(store.get(keys::THEME).as_deref(), Some("dark"));
    assert_eq!(store.get(keys::CONTRAST).as_deref(), Some("high"));
    assert_eq!(ThemePreferences::load(&store), prefs);
}

#[test]
fn theme_load_seeds_from_legacy_dark_mode_flag() {
    let store = MemoryStore::with_entries([(keys::USER_PREFERENCES, r#"{"darkMode":true,"emails":false}"#)]);
    assert_eq!(ThemePreferences::load(&store).theme, Theme::Dark);
}

#[test]
fn theme_key_wins_over_legacy_dark_mode_flag() {
    let store = MemoryStore::with_entries([
        (keys::USER_PREFERENCES, r#"{"darkMode":true}"#),
        (keys::THEME, "light"),
    ]);
    assert_eq!(ThemePreferences::load(&store).theme, Theme::Light);
}

#[test]
fn theme_invalid_contrast_keeps_valid_theme() {
    let store = MemoryStore::with_entries([(keys::THEME, "dark"), (keys::CONTRAST, "ultra")]);
    let prefs = ThemePreferences::load(&store);
    assert_eq!(prefs.theme, Theme::Dark);
    assert_eq!(prefs.contrast, Contrast::Normal);
}

// =============================================================================
// notifications
// =============================================================================

#[test]
fn notifications_decode_fills_defaults_and_ignores_dark_mode() {
    let decoded = NotificationPreferences::decode(Some(r#"{"darkMode":true,"emails":false}"#));
    assert_eq!(decoded, NotificationPreferences { reminders: true, emails: false, achievements: true });
}

#[test]
fn notifications_encode_omits_dark_mode() {
    let encoded = NotificationPreferences::default().encode();
    assert!(!encoded.contains("darkMode"));
    assert_eq!(NotificationPreferences::decode(Some(&encoded)), NotificationPreferences::default());
}

#[test]
fn legacy_dark_mode_requires_boolean() {
    assert_eq!(NotificationPreferences::legacy_dark_mode(Some(r#"{"darkMode":false}"#)), Some(false));
    assert_eq!(NotificationPreferences::legacy_dark_mode(Some(r#"{"darkMode":"on"}"#)), None);
    assert_eq!(NotificationPreferences::legacy_dark_mode(None), None);
}

// =============================================================================
// onboarding
// =============================================================================

#[test]
fn onboarding_decode_reads_user_and_flag_independently() {
    let decoded = OnboardingProfile::decode(Some(r#"{"name":"Carol","age":"68","goals":["balance","cardio"]}"#), None);
    assert_eq!(decoded.name, "Carol");
    assert_eq!(decoded.age, "68");
    assert_eq!(decoded.goals.iter().map(String::as_str).collect::<Vec<_>>(), ["balance", "cardio"]);
    assert!(!decoded.completed);

    let flag_only = OnboardingProfile::decode(Some("garbage"), Some("true"));
    assert!(flag_only.completed);
    assert!(flag_only.name.is_empty());
}

#[test]
fn onboarding_decode_drops_non_string_goals() {
    let decoded = OnboardingProfile::decode(Some(r#"{"goals":["strength",7,null],"age":70}"#), None);
    assert_eq!(decoded.goals.len(), 1);
    assert!(decoded.goals.contains("strength"));
    assert_eq!(decoded.age, "70");
}

#[test]
fn decode_flag_only_accepts_true() {
    assert!(decode_flag(Some("true")));
    assert!(decode_flag(Some("\"true\"")));
    assert!(!decode_flag(Some("false")));
    assert!(!decode_flag(Some("1")));
    assert!(!decode_flag(None));
}

#[test]
fn onboarding_save_never_writes_false_flag() {
    let store = MemoryStore::new();
    OnboardingProfile { name: "Ann".to_owned(), ..Default::default() }
        .save(&store)
        .unwrap();
    assert_eq!(store.get(keys::ONBOARDED), None);
    assert!(store.get(keys::USER).is_some());
}

#[test]
fn onboarding_normalize_keeps_completion() {
    let prev = OnboardingProfile { completed: true, ..Default::default() };
    let next = OnboardingProfile { completed: false, name: "Bo".to_owned(), ..Default::default() };
    let merged = OnboardingProfile::normalize(&prev, next);
    assert!(merged.completed);
    assert_eq!(merged.name, "Bo");
}
