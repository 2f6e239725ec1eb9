use std::sync::Arc;

use prefs::{MemoryStore, MemorySurface};

use super::*;

fn finished_profile() -> OnboardingProfile {
    OnboardingProfile { name: "Ada".into(), age: "70".into(), ..OnboardingProfile::default() }
}

#[test]
fn step_dots_mark_current_and_passed_steps() {
    assert_eq!(
        step_dot_classes(OnboardingStep::Goals),
        vec!["dot dot--done", "dot dot--done", "dot dot--current", "dot"]
    );
}

#[test]
fn step_dots_on_first_step() {
    assert_eq!(step_dot_classes(OnboardingStep::Welcome), vec!["dot dot--current", "dot", "dot", "dot"]);
}

#[test]
fn next_label_changes_on_last_step() {
    assert_eq!(next_label(OnboardingStep::AboutYou), "Continue");
    assert_eq!(next_label(OnboardingStep::Preferences), "Get Started");
}

#[test]
fn finishing_with_a_working_store_goes_to_dashboard() {
    let prefs = PreferenceContext::new(Arc::new(MemoryStore::new()), Arc::new(MemorySurface::new()));
    assert_eq!(finish(&prefs, finished_profile()), Finish::Dashboard);
    assert!(prefs.is_onboarded());
}

#[test]
fn finishing_with_a_full_store_keeps_the_notice() {
    let prefs = PreferenceContext::new(Arc::new(MemoryStore::with_quota(1)), Arc::new(MemorySurface::new()));
    let outcome = finish(&prefs, finished_profile());
    assert!(matches!(outcome, Finish::Warn(ref notice) if notice.contains("could not be saved")));
    assert!(prefs.is_onboarded());
}
