use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::day::{day_key, DayKey};
use crate::validator::RejectReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckinId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub owner: UserId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub score: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkin {
    pub id: CheckinId,
    pub habit_id: HabitId,
    pub checkin_date: DateTime<Utc>,
    pub rating: u8,
    pub reflection: String,
}

impl Checkin {
    pub fn day(&self) -> DayKey {
        day_key(self.checkin_date)
    }
}

/// A habit accepted for insertion; field validation happens before this is
/// constructed.
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RecordCheckinError {
    /// The store already holds a check-in for this (habit, day).
    DuplicateDay,
    UnknownHabit,
}

/// The durable record set: habits and their check-ins. Check-ins are owned
/// by their habit and never move between habits.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub habits: BTreeMap<HabitId, Habit>,
    pub checkins: BTreeMap<HabitId, Vec<Checkin>>,
    pub next_habit_id: u64,
    pub next_checkin_id: u64,
}

impl AppData {
    pub fn insert_habit(&mut self, owner: UserId, new: NewHabit) -> &Habit {
        self.next_habit_id += 1;
        let id = HabitId(self.next_habit_id);
        let habit = Habit {
            id,
            owner,
            name: new.name,
            description: new.description,
            start_date: new.start_date,
            end_date: new.end_date,
            score: 0,
        };
        self.habits.entry(id).or_insert(habit)
    }

    pub fn get_habit(&self, id: HabitId) -> Option<&Habit> {
        self.habits.get(&id)
    }

    pub fn list_habits<'a>(&'a self, owner: &'a UserId) -> impl Iterator<Item = &'a Habit> {
        self.habits.values().filter(move |habit| &habit.owner == owner)
    }

    pub fn checkins_for(&self, id: HabitId) -> &[Checkin] {
        self.checkins.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The coupled write: append a check-in and bump the habit's score as
    /// one mutation. Re-checks (habit, day) uniqueness so a caller that
    /// slipped past the validator still cannot produce a duplicate.
    pub fn record_checkin(
        &mut self,
        habit_id: HabitId,
        rating: u8,
        reflection: String,
        timestamp: DateTime<Utc>,
    ) -> Result<Checkin, RecordCheckinError> {
        if !self.habits.contains_key(&habit_id) {
            return Err(RecordCheckinError::UnknownHabit);
        }
        let day = day_key(timestamp);
        if self.checkins_for(habit_id).iter().any(|c| c.day() == day) {
            return Err(RecordCheckinError::DuplicateDay);
        }

        self.next_checkin_id += 1;
        let checkin = Checkin {
            id: CheckinId(self.next_checkin_id),
            habit_id,
            checkin_date: timestamp,
            rating,
            reflection,
        };
        if let Some(habit) = self.habits.get_mut(&habit_id) {
            habit.score = habit.score.saturating_add(1);
        }
        self.checkins.entry(habit_id).or_default().push(checkin.clone());
        Ok(checkin)
    }
}

#[derive(Debug, Deserialize)]
pub struct NewHabitRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct CheckinRequest {
    pub rating: i64,
    pub reflection: String,
}

#[derive(Debug, Serialize)]
pub struct WeeklyTrendPoint {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub completed_days: u32,
    pub avg_rating: Option<f64>,
}

/// Fully computed per-habit read model. Never persisted; rebuilt from a
/// (habit, check-ins) snapshot on every read.
#[derive(Debug, Serialize)]
pub struct HabitView {
    pub id: HabitId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub score: u64,
    pub total_days: i64,
    pub days_passed: i64,
    pub completed_days: u32,
    pub progress_percent: f64,
    pub adherence_percent: f64,
    pub average: f64,
    pub streak: u32,
    pub record: u32,
    pub weekly_trend: Vec<WeeklyTrendPoint>,
    pub has_checked_in_today: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckinOutcome {
    Accepted { checkin: Checkin, view: HabitView },
    Rejected { reason: RejectReason, message: String },
}

impl CheckinOutcome {
    pub fn rejected(reason: RejectReason) -> Self {
        Self::Rejected {
            message: reason.message().to_string(),
            reason,
        }
    }
}
