use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::day::day_key;
use crate::models::{Checkin, Habit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    AlreadyCheckedInToday,
    OutOfRange,
    InvalidRating,
    EmptyReflection,
}

impl RejectReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::AlreadyCheckedInToday => "already checked in today",
            Self::OutOfRange => "habit is not active on this day",
            Self::InvalidRating => "rating must be between 1 and 5",
            Self::EmptyReflection => "reflection must not be empty",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProposedCheckin<'a> {
    pub rating: i64,
    pub reflection: &'a str,
    pub timestamp: DateTime<Utc>,
}

/// Decides whether a proposed check-in is admissible. Uniqueness is checked
/// first so a repeat submission on the same day answers
/// `AlreadyCheckedInToday` no matter what rating or reflection it carries.
/// The habit's end day is inclusive: the last loggable day is `end_date`.
pub fn validate(
    habit: &Habit,
    existing: &[Checkin],
    proposed: &ProposedCheckin<'_>,
) -> Result<(), RejectReason> {
    let today = day_key(proposed.timestamp);

    if existing.iter().any(|checkin| checkin.day() == today) {
        return Err(RejectReason::AlreadyCheckedInToday);
    }
    if today < habit.start_date || today > habit.end_date {
        return Err(RejectReason::OutOfRange);
    }
    if !(1..=5).contains(&proposed.rating) {
        return Err(RejectReason::InvalidRating);
    }
    if proposed.reflection.trim().is_empty() {
        return Err(RejectReason::EmptyReflection);
    }
    Ok(())
}
