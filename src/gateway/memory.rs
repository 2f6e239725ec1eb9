//! Process-local gateway used by tests and `GATEWAY_BACKEND=memory`.
//!
//! Seeded with a small catalog so the workout pages have something to show.
//! Nothing persists across restarts.
//!
//! Sessions never expire here. A token is dropped only on sign-out, so a
//! long-running memory backend keeps every abandoned session until restart.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use super::progress::{next_achievement, today_utc};
use super::types::{
    Achievement, Credentials, LeaderboardEntry, NewAccount, Profile, ProfileUpdate, Session, SessionUser, Workout,
    WorkoutCategory,
};
use super::{
    AchievementGateway, GatewayError, LEADERBOARD_SIZE, ProfileGateway, SessionGateway, WorkoutGateway, WorkoutOrder,
    WorkoutQuery,
};

pub const FLEXIBILITY_ID: Uuid = Uuid::from_u128(0x6d0c_41f1_0000_4000_8000_0000_0000_0001);
pub const STABILITY_ID: Uuid = Uuid::from_u128(0x6d0c_41f1_0000_4000_8000_0000_0000_0002);
pub const CARDIO_ID: Uuid = Uuid::from_u128(0x6d0c_41f1_0000_4000_8000_0000_0000_0003);

pub const CHAIR_YOGA_ID: Uuid = Uuid::from_u128(0x9a1e_52c3_0000_4000_8000_0000_0000_0001);
pub const BALANCE_TRAINING_ID: Uuid = Uuid::from_u128(0x9a1e_52c3_0000_4000_8000_0000_0000_0002);
pub const MORNING_STRETCH_ID: Uuid = Uuid::from_u128(0x9a1e_52c3_0000_4000_8000_0000_0000_0003);
pub const MINDFUL_WALKING_ID: Uuid = Uuid::from_u128(0x9a1e_52c3_0000_4000_8000_0000_0000_0004);

type Clock = Box<dyn Fn() -> Date + Send + Sync>;

struct Account {
    password: String,
    user: SessionUser,
}

#[derive(Default)]
struct Tables {
    /// Keyed by lowercased email.
    accounts: HashMap<String, Account>,
    /// Access token to user id.
    sessions: HashMap<String, Uuid>,
    profiles: HashMap<Uuid, Profile>,
    categories: Vec<WorkoutCategory>,
    workouts: Vec<Workout>,
    completions: Vec<(Uuid, Uuid)>,
    achievements: HashMap<Uuid, Achievement>,
}

pub struct MemoryGateway {
    tables: Mutex<Tables>,
    today: Clock,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGateway {
    /// Seeded catalog, no accounts, UTC clock.
    #[must_use]
    pub fn new() -> Self {
        let (categories, workouts) = seed_catalog();
        Self {
            tables: Mutex::new(Tables { categories, workouts, ..Tables::default() }),
            today: Box::new(today_utc),
        }
    }

    /// Replace the clock used to date completions.
    #[cfg(test)]
    #[must_use]
    pub fn with_clock(mut self, today: impl Fn() -> Date + Send + Sync + 'static) -> Self {
        self.today = Box::new(today);
        self
    }

    /// Number of recorded completions, across all users.
    #[cfg(test)]
    #[must_use]
    pub fn completion_count(&self) -> usize {
        self.lock().completions.len()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SessionGateway for MemoryGateway {
    async fn sign_up(&self, account: &NewAccount) -> Result<(), GatewayError> {
        let email = account.email.trim().to_ascii_lowercase();
        if email.is_empty() || account.password.is_empty() {
            return Err(GatewayError::Conflict("email and password are required".into()));
        }

        let mut tables = self.lock();
        if tables.accounts.contains_key(&email) {
            return Err(GatewayError::Conflict("User already registered".into()));
        }

        let id = Uuid::new_v4();
        let first_name = non_empty(&account.first_name);
        let last_name = non_empty(&account.last_name);
        tables.profiles.insert(id, Profile { id, first_name: first_name.clone(), last_name: last_name.clone(), age: None });
        tables.accounts.insert(
            email.clone(),
            Account {
                password: account.password.clone(),
                user: SessionUser { id, email: Some(email), first_name, last_name },
            },
        );
        Ok(())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, GatewayError> {
        let email = credentials.email.trim().to_ascii_lowercase();
        let mut tables = self.lock();
        let user = match tables.accounts.get(&email) {
            Some(account) if account.password == credentials.password => account.user.clone(),
            _ => return Err(GatewayError::Unauthorized("Invalid login credentials".into())),
        };

        let access_token = Uuid::new_v4().simple().to_string();
        tables.sessions.insert(access_token.clone(), user.id);
        Ok(Session { access_token, user })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), GatewayError> {
        self.lock().sessions.remove(access_token);
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<SessionUser, GatewayError> {
        let tables = self.lock();
        let id = tables
            .sessions
            .get(access_token)
            .ok_or_else(|| GatewayError::Unauthorized("unknown session".into()))?;
        tables
            .accounts
            .values()
            .find(|account| account.user.id == *id)
            .map(|account| account.user.clone())
            .ok_or_else(|| GatewayError::Unauthorized("account removed".into()))
    }
}

#[async_trait]
impl ProfileGateway for MemoryGateway {
    async fn profile(&self, user_id: Uuid) -> Result<Profile, GatewayError> {
        self.lock().profiles.get(&user_id).cloned().ok_or(GatewayError::NotFound)
    }

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<Profile, GatewayError> {
        let profile = Profile {
            id: user_id,
            first_name: non_empty(&update.first_name),
            last_name: non_empty(&update.last_name),
            age: update.age,
        };
        self.lock().profiles.insert(user_id, profile.clone());
        Ok(profile)
    }
}

#[async_trait]
impl WorkoutGateway for MemoryGateway {
    async fn list_workouts(&self, query: &WorkoutQuery) -> Result<Vec<Workout>, GatewayError> {
        let tables = self.lock();
        let mut rows: Vec<Workout> = tables
            .workouts
            .iter()
            .filter(|w| query.category.is_none_or(|c| w.category_id == Some(c)))
            .filter(|w| query.difficulty.as_deref().is_none_or(|d| w.difficulty.eq_ignore_ascii_case(d)))
            .cloned()
            .collect();

        match query.order {
            WorkoutOrder::Title => rows.sort_by(|a, b| a.title.cmp(&b.title)),
            WorkoutOrder::Duration => rows.sort_by(|a, b| a.duration.cmp(&b.duration).then(a.title.cmp(&b.title))),
        }
        rows.truncate(usize::try_from(query.effective_limit()).unwrap_or(usize::MAX));
        Ok(rows)
    }

    async fn workout(&self, id: Uuid) -> Result<Workout, GatewayError> {
        self.lock().workouts.iter().find(|w| w.id == id).cloned().ok_or(GatewayError::NotFound)
    }

    async fn categories(&self) -> Result<Vec<WorkoutCategory>, GatewayError> {
        let mut categories = self.lock().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[async_trait]
impl AchievementGateway for MemoryGateway {
    async fn complete_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<Achievement, GatewayError> {
        let today = (self.today)();
        let mut tables = self.lock();
        if !tables.workouts.iter().any(|w| w.id == workout_id) {
            return Err(GatewayError::NotFound);
        }

        tables.completions.push((user_id, workout_id));
        let next = next_achievement(user_id, tables.achievements.get(&user_id), today);
        tables.achievements.insert(user_id, next.clone());
        Ok(next)
    }

    async fn achievement(&self, user_id: Uuid) -> Result<Option<Achievement>, GatewayError> {
        Ok(self.lock().achievements.get(&user_id).cloned())
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, GatewayError> {
        let tables = self.lock();
        let mut rows: Vec<LeaderboardEntry> = tables
            .achievements
            .values()
            .map(|a| {
                let profile = tables.profiles.get(&a.user_id);
                LeaderboardEntry {
                    user_id: a.user_id,
                    first_name: profile.and_then(|p| p.first_name.clone()),
                    last_name: profile.and_then(|p| p.last_name.clone()),
                    points: a.points,
                    workouts_completed: a.workouts_completed,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.points.cmp(&a.points).then(a.user_id.cmp(&b.user_id)));
        rows.truncate(usize::try_from(LEADERBOARD_SIZE).unwrap_or(usize::MAX));
        Ok(rows)
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn seed_catalog() -> (Vec<WorkoutCategory>, Vec<Workout>) {
    let categories = vec![
        WorkoutCategory {
            id: FLEXIBILITY_ID,
            name: "Flexibility".into(),
            description: Some("Gentle stretches for easier movement".into()),
        },
        WorkoutCategory {
            id: STABILITY_ID,
            name: "Stability".into(),
            description: Some("Balance work to stay steady on your feet".into()),
        },
        WorkoutCategory { id: CARDIO_ID, name: "Cardio".into(), description: Some("Low-impact heart health".into()) },
    ];

    let workouts = vec![
        Workout {
            id: CHAIR_YOGA_ID,
            title: "Chair Yoga Basics".into(),
            description: Some(
                "A gentle yoga practice done while seated. Improves flexibility and eases stiffness in the joints."
                    .into(),
            ),
            duration: 15,
            difficulty: "easy".into(),
            category_id: Some(FLEXIBILITY_ID),
            category_name: Some("Flexibility".into()),
            image_url: Some("https://images.unsplash.com/photo-1518495973542-4542c06a5843?auto=format&fit=crop&w=800&h=600".into()),
            instructor: Some("Sarah Johnson".into()),
            instructions: strings(&[
                "Start seated with feet flat on the floor, back straight",
                "Roll shoulders backward and forward gently",
                "Stretch arms overhead, feeling the stretch in your sides",
                "Twist upper body to each side while keeping hips stable",
                "Extend one leg at a time, flex and point toes",
                "Breathe deeply throughout the session",
            ]),
            benefits: strings(&["Improves flexibility", "Reduces joint pain", "Enhances circulation", "Reduces stress"]),
            voice_instructions: Some(strings(&[
                "Sit tall with both feet on the floor.",
                "Slowly roll your shoulders back, then forward.",
                "Reach your arms up and breathe in.",
            ])),
        },
        Workout {
            id: BALANCE_TRAINING_ID,
            title: "Balance Training".into(),
            description: Some("Simple balance exercises with chair support to build stability and prevent falls.".into()),
            duration: 20,
            difficulty: "medium".into(),
            category_id: Some(STABILITY_ID),
            category_name: Some("Stability".into()),
            image_url: Some("https://images.unsplash.com/photo-1517022812141-23620dba5c23?auto=format&fit=crop&w=800&h=600".into()),
            instructor: Some("Robert Chen".into()),
            instructions: strings(&[
                "Stand with feet hip-width apart, holding a sturdy chair",
                "Shift your weight from one foot to the other",
                "Stand on one leg for 10 to 30 seconds, then switch",
                "Walk heel to toe in a straight line",
            ]),
            benefits: strings(&["Improves stability", "Prevents falls", "Strengthens leg muscles", "Boosts confidence"]),
            voice_instructions: None,
        },
        Workout {
            id: MORNING_STRETCH_ID,
            title: "Gentle Morning Stretches".into(),
            description: Some("Wake up the body with a short sequence of easy stretches.".into()),
            duration: 10,
            difficulty: "easy".into(),
            category_id: Some(FLEXIBILITY_ID),
            category_name: Some("Flexibility".into()),
            image_url: Some("https://images.unsplash.com/photo-1465146344425-f00d5f5c8f07?auto=format&fit=crop&w=800&h=600".into()),
            instructor: Some("Maria Garcia".into()),
            instructions: strings(&[
                "Begin with gentle neck rotations",
                "Roll shoulders forward and backward",
                "Stretch arms overhead and to the sides",
                "Finish with seated spinal twists",
            ]),
            benefits: strings(&["Reduces morning stiffness", "Improves circulation", "Boosts energy", "Enhances mood"]),
            voice_instructions: None,
        },
        Workout {
            id: MINDFUL_WALKING_ID,
            title: "Mindful Walking".into(),
            description: Some("An unhurried walk that pairs light cardio with attention to breath.".into()),
            duration: 25,
            difficulty: "medium".into(),
            category_id: Some(CARDIO_ID),
            category_name: Some("Cardio".into()),
            image_url: Some("https://images.unsplash.com/photo-1482938289607-e9573fc25ebb?auto=format&fit=crop&w=800&h=600".into()),
            instructor: Some("David Wilson".into()),
            instructions: strings(&[
                "Warm up with 5 minutes of gentle walking",
                "Focus on your breathing as you walk",
                "Notice your feet touching the ground",
                "Observe your surroundings without judgment",
            ]),
            benefits: strings(&["Improves cardiovascular health", "Reduces stress", "Enhances mindfulness", "Boosts mood"]),
            voice_instructions: None,
        },
    ];

    (categories, workouts)
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
