use super::*;
use crate::store::MemoryStore;

fn flow_at_goals() -> OnboardingFlow {
    let mut flow = OnboardingFlow::new();
    flow.advance().unwrap();
    flow.set_name("Carol");
    flow.set_age("68");
    flow.advance().unwrap();
    flow
}

#[test]
fn starts_at_welcome() {
    let flow = OnboardingFlow::new();
    assert_eq!(flow.step(), OnboardingStep::Welcome);
    assert!(flow.goals().is_empty());
}

#[test]
fn about_you_requires_name_and_age() {
    let mut flow = OnboardingFlow::new();
    assert_eq!(flow.advance(), Ok(Advance::Step(OnboardingStep::AboutYou)));

    assert_eq!(flow.advance(), Err(OnboardingError::MissingFields));
    flow.set_name("Carol");
    assert_eq!(flow.advance(), Err(OnboardingError::MissingFields));
    flow.set_age("   ");
    assert_eq!(flow.advance(), Err(OnboardingError::MissingFields));
    assert_eq!(flow.step(), OnboardingStep::AboutYou);

    flow.set_age("68");
    assert_eq!(flow.advance(), Ok(Advance::Step(OnboardingStep::Goals)));
}

#[test]
fn goals_step_requires_a_selection() {
    let mut flow = flow_at_goals();
    assert_eq!(flow.advance(), Err(OnboardingError::NoGoals));
    flow.toggle_goal("balance");
    assert_eq!(flow.advance(), Ok(Advance::Step(OnboardingStep::Preferences)));
}

#[test]
fn toggle_goal_flips_and_ignores_unknown_ids() {
    let mut flow = flow_at_goals();
    flow.toggle_goal("cardio");
    assert!(flow.is_selected("cardio"));
    flow.toggle_goal("cardio");
    assert!(!flow.is_selected("cardio"));
    flow.toggle_goal("skydiving");
    assert!(flow.goals().is_empty());
}

#[test]
fn last_step_yields_completed_profile() {
    let mut flow = flow_at_goals();
    flow.toggle_goal("strength");
    flow.toggle_goal("balance");
    flow.advance().unwrap();

    let Ok(Advance::Completed(profile)) = flow.advance() else {
        panic!("expected completion");
    };
    assert!(profile.completed);
    assert_eq!(profile.name, "Carol");
    assert_eq!(profile.age, "68");
    assert_eq!(profile.goals.len(), 2);
}

#[test]
fn back_keeps_answers_and_stops_at_first_step() {
    let mut flow = flow_at_goals();
    flow.back();
    assert_eq!(flow.step(), OnboardingStep::AboutYou);
    assert_eq!(flow.name(), "Carol");
    flow.back();
    flow.back();
    assert_eq!(flow.step(), OnboardingStep::Welcome);
}

#[test]
fn step_metadata_is_ordered() {
    for (i, step) in OnboardingStep::ALL.iter().enumerate() {
        assert_eq!(step.index(), i);
        assert!(!step.title().is_empty());
    }
    assert!(OnboardingStep::Preferences.is_last());
    assert!(!OnboardingStep::Goals.is_last());
}

#[test]
fn error_messages_match_form_copy() {
    assert_eq!(OnboardingError::MissingFields.to_string(), "Please fill in all fields");
    assert_eq!(OnboardingError::NoGoals.to_string(), "Please select at least one goal");
}

#[test]
fn has_completed_onboarding_reads_flag() {
    assert!(!has_completed_onboarding(&MemoryStore::new()));
    assert!(has_completed_onboarding(&MemoryStore::with_entries([(keys::ONBOARDED, "true")])));
    assert!(!has_completed_onboarding(&MemoryStore::with_entries([(keys::ONBOARDED, "yes")])));
}
