//! Device-local workout schedule.
//!
//! DESIGN
//! ======
//! Planned sessions never leave the device. They are kept as one JSON array
//! under `scheduledWorkouts` in the same store the preference concerns use.
//! Decoding keeps every entry that still parses and drops the rest.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use prefs::{PreferenceStore, StoreError};
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

use crate::util::calendar::iso_date;

pub const SCHEDULE_KEY: &str = "scheduledWorkouts";

pub const WORKOUT_TYPES: [(&str, &str); 6] = [
    ("chair-yoga", "Chair Yoga"),
    ("gentle-stretching", "Gentle Stretching"),
    ("balance", "Balance Training"),
    ("walking", "Walking"),
    ("water-exercise", "Water Exercise"),
    ("tai-chi", "Tai Chi"),
];

pub const DURATIONS: [u16; 6] = [10, 15, 20, 30, 45, 60];

const UPCOMING_LIMIT: usize = 5;

const CLOCK_24H: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
const CLOCK_12H: &[BorrowedFormatItem<'static>] = format_description!("[hour repr:12]:[minute] [period]");

time::serde::format_description!(clock_time, Time, "[hour]:[minute]");

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledWorkout {
    pub id: u64,
    pub title: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(with = "clock_time")]
    pub time: Time,
    pub duration_minutes: u16,
    pub kind: String,
}

impl ScheduledWorkout {
    /// "09:00 AM".
    #[must_use]
    pub fn time_label(&self) -> String {
        self.time.format(CLOCK_12H).unwrap_or_default()
    }

    /// "Chair Yoga • 15 minutes".
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} • {} minutes", workout_type_label(&self.kind), self.duration_minutes)
    }
}

/// Form state for a new entry, as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub date: String,
    pub kind: String,
    pub title: String,
    pub time: String,
    pub duration_minutes: u16,
}

impl ScheduleDraft {
    #[must_use]
    pub fn new(date: Date) -> Self {
        Self {
            date: crate::util::calendar::format_iso(date),
            kind: WORKOUT_TYPES[0].0.to_owned(),
            title: String::new(),
            time: String::new(),
            duration_minutes: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Please choose a date")]
    MissingDate,
    #[error("Please choose today or a later date")]
    PastDate,
    #[error("Please enter a title")]
    MissingTitle,
    #[error("Please choose a time")]
    MissingTime,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    entries: Vec<ScheduledWorkout>,
}

impl Schedule {
    #[must_use]
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        let items = match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
            Ok(items) => items,
            Err(e) => {
                log::debug!("malformed stored schedule; starting empty: {e}");
                return Self::default();
            }
        };
        let entries = items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<ScheduledWorkout>(item).ok())
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn encode(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_owned())
    }

    #[must_use]
    pub fn load(store: &dyn PreferenceStore) -> Self {
        Self::decode(store.get(SCHEDULE_KEY).as_deref())
    }

    /// # Errors
    ///
    /// Returns the store's error when the write is rejected.
    pub fn save(&self, store: &dyn PreferenceStore) -> Result<(), StoreError> {
        store.set(SCHEDULE_KEY, &self.encode())
    }

    #[must_use]
    pub fn entries(&self) -> &[ScheduledWorkout] {
        &self.entries
    }

    /// Validate `draft` and append it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScheduleError`] the draft trips.
    pub fn add(&mut self, draft: &ScheduleDraft, today: Date) -> Result<ScheduledWorkout, ScheduleError> {
        let date = crate::util::calendar::parse_iso(&draft.date).ok_or(ScheduleError::MissingDate)?;
        if date < today {
            return Err(ScheduleError::PastDate);
        }
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ScheduleError::MissingTitle);
        }
        let time = Time::parse(draft.time.trim(), CLOCK_24H).map_err(|_| ScheduleError::MissingTime)?;

        let entry = ScheduledWorkout {
            id: self.entries.iter().map(|e| e.id).max().map_or(1, |id| id + 1),
            title: title.to_owned(),
            date,
            time,
            duration_minutes: draft.duration_minutes,
            kind: draft.kind.clone(),
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Entries on `date`, earliest first.
    #[must_use]
    pub fn on(&self, date: Date) -> Vec<ScheduledWorkout> {
        let mut day: Vec<ScheduledWorkout> = self.entries.iter().filter(|e| e.date == date).cloned().collect();
        day.sort_by_key(|e| (e.time, e.id));
        day
    }

    /// The next few entries from `today` on.
    #[must_use]
    pub fn upcoming(&self, today: Date) -> Vec<ScheduledWorkout> {
        let mut next: Vec<ScheduledWorkout> = self.entries.iter().filter(|e| e.date >= today).cloned().collect();
        next.sort_by_key(|e| (e.date, e.time, e.id));
        next.truncate(UPCOMING_LIMIT);
        next
    }
}

/// Display label for a workout type id; unknown ids show as written.
#[must_use]
pub fn workout_type_label(kind: &str) -> &str {
    WORKOUT_TYPES
        .iter()
        .find(|(id, _)| *id == kind)
        .map_or(kind, |(_, label)| label)
}
