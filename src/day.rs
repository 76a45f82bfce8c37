use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Canonical calendar-day key. All uniqueness and streak comparisons use
/// UTC days so the answer does not depend on server locale.
pub type DayKey = NaiveDate;

pub fn day_key(timestamp: DateTime<Utc>) -> DayKey {
    timestamp.date_naive()
}

pub fn today() -> DayKey {
    day_key(Utc::now())
}

/// True when `next` is exactly the day after `prev`.
pub fn is_next_day(prev: DayKey, next: DayKey) -> bool {
    prev + Duration::days(1) == next
}
