//! Onboarding step sequence.
//!
//! Four linear steps. The flow itself is pure: it validates the draft and
//! reports when the last step is passed. Committing the finished profile goes
//! through the onboarding concern (see [`crate::PreferenceContext::complete_onboarding`]).

#[cfg(test)]
#[path = "onboarding_test.rs"]
mod onboarding_test;

use std::collections::BTreeSet;

use crate::codec::decode_flag;
use crate::records::OnboardingProfile;
use crate::store::{PreferenceStore, keys};

/// A selectable wellness goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const GOALS: [Goal; 4] = [
    Goal { id: "joint-mobility", label: "Joint Mobility", description: "Improve range of motion and flexibility" },
    Goal { id: "balance", label: "Balance & Stability", description: "Enhance balance and prevent falls" },
    Goal { id: "strength", label: "Gentle Strength", description: "Build functional strength for daily activities" },
    Goal { id: "cardio", label: "Heart Health", description: "Improve cardiovascular health" },
];

#[must_use]
pub fn is_known_goal(id: &str) -> bool {
    GOALS.iter().any(|g| g.id == id)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnboardingStep {
    #[default]
    Welcome,
    AboutYou,
    Goals,
    Preferences,
}

impl OnboardingStep {
    pub const ALL: [Self; 4] = [Self::Welcome, Self::AboutYou, Self::Goals, Self::Preferences];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Welcome => 0,
            Self::AboutYou => 1,
            Self::Goals => 2,
            Self::Preferences => 3,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome to Gentle Motion",
            Self::AboutYou => "Let's get to know you",
            Self::Goals => "Choose your wellness goals",
            Self::Preferences => "Almost there!",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Welcome => "Your personal wellness companion for healthy aging",
            Self::AboutYou => "Help us personalize your experience",
            Self::Goals => "What would you like to focus on?",
            Self::Preferences => "Set your preferences for a tailored experience",
        }
    }

    #[must_use]
    pub fn is_last(self) -> bool {
        self == Self::Preferences
    }

    fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OnboardingError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please select at least one goal")]
    NoGoals,
}

/// Result of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given step.
    Step(OnboardingStep),
    /// The last step was passed; the profile is ready to commit.
    Completed(OnboardingProfile),
}

/// Draft answers and the current step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingFlow {
    step: OnboardingStep,
    name: String,
    age: String,
    goals: BTreeSet<String>,
}

impl OnboardingFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn age(&self) -> &str {
        &self.age
    }

    #[must_use]
    pub fn goals(&self) -> &BTreeSet<String> {
        &self.goals
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_age(&mut self, age: impl Into<String>) {
        self.age = age.into();
    }

    /// Select or deselect a goal. Unknown ids are ignored.
    pub fn toggle_goal(&mut self, id: &str) {
        if !is_known_goal(id) {
            return;
        }
        if !self.goals.remove(id) {
            self.goals.insert(id.to_owned());
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.goals.contains(id)
    }

    /// Validate the current step and move forward.
    ///
    /// # Errors
    ///
    /// `MissingFields` on "about you" without a name and age, `NoGoals` on
    /// the goals step without a selection. The step does not change.
    pub fn advance(&mut self) -> Result<Advance, OnboardingError> {
        match self.step {
            OnboardingStep::AboutYou if self.name.trim().is_empty() || self.age.trim().is_empty() => {
                return Err(OnboardingError::MissingFields);
            }
            OnboardingStep::Goals if self.goals.is_empty() => return Err(OnboardingError::NoGoals),
            _ => {}
        }

        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(Advance::Step(next))
            }
            None => Ok(Advance::Completed(OnboardingProfile {
                name: self.name.trim().to_owned(),
                age: self.age.trim().to_owned(),
                goals: self.goals.clone(),
                completed: true,
            })),
        }
    }

    /// Step back, keeping the answers. No-op on the first step.
    pub fn back(&mut self) {
        if let Some(prev) = self.step.previous() {
            self.step = prev;
        }
    }
}

/// Whether a previous session finished onboarding, read straight from the store.
#[must_use]
pub fn has_completed_onboarding(store: &dyn PreferenceStore) -> bool {
    decode_flag(store.get(keys::ONBOARDED).as_deref())
}
