use chrono::Duration;

use crate::day::{is_next_day, DayKey};
use crate::models::{Checkin, WeeklyTrendPoint};

/// Number of 7-day buckets reported in the weekly trend.
pub const TREND_WEEKS: usize = 4;

/// Distinct check-in days, ascending. The validator guarantees at most one
/// check-in per day, so this is a plain sort.
pub fn checkin_days(checkins: &[Checkin]) -> Vec<DayKey> {
    let mut days: Vec<DayKey> = checkins.iter().map(Checkin::day).collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// Streak: length of the trailing run of consecutive days, counted only if
/// that run ends today or yesterday. A run that stopped earlier is broken
/// and reports 0 rather than a stale positive number.
/// Record: the longest consecutive run anywhere in the history.
pub fn streak_and_record(days: &[DayKey], today: DayKey) -> (u32, u32) {
    let mut record = 0u32;
    let mut run = 0u32;
    let mut prev: Option<DayKey> = None;

    for &day in days {
        run = match prev {
            Some(p) if is_next_day(p, day) => run + 1,
            _ => 1,
        };
        record = record.max(run);
        prev = Some(day);
    }

    let streak = match prev {
        Some(last) if last == today || is_next_day(last, today) => run,
        _ => 0,
    };
    (streak, record)
}

/// Ratings grouped into 7-day buckets counted backward from `today`, the
/// most recent `weeks` buckets reported oldest first. Days without a
/// check-in contribute no data point, so an untouched bucket averages to
/// `None` rather than dragging in zeros.
pub fn weekly_trend(checkins: &[Checkin], today: DayKey, weeks: usize) -> Vec<WeeklyTrendPoint> {
    if checkins.is_empty() {
        return Vec::new();
    }

    let mut points = Vec::with_capacity(weeks);
    for offset in (0..weeks).rev() {
        let end = today - Duration::days(7 * offset as i64);
        let start = end - Duration::days(6);

        let mut completed_days = 0u32;
        let mut rating_sum = 0u64;
        for checkin in checkins {
            let day = checkin.day();
            if day >= start && day <= end {
                completed_days += 1;
                rating_sum += u64::from(checkin.rating);
            }
        }

        let avg_rating = if completed_days > 0 {
            Some(rating_sum as f64 / f64::from(completed_days))
        } else {
            None
        };

        points.push(WeeklyTrendPoint {
            start_date: start,
            end_date: end,
            completed_days,
            avg_rating,
        });
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CheckinId, HabitId};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(day: u32) -> DayKey {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn days(nums: &[u32]) -> Vec<DayKey> {
        nums.iter().map(|&n| date(n)).collect()
    }

    fn checkin(day: u32, rating: u8) -> Checkin {
        Checkin {
            id: CheckinId(day as u64),
            habit_id: HabitId(1),
            checkin_date: Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap(),
            rating,
            reflection: "noted".into(),
        }
    }

    #[test]
    fn empty_history_is_all_zero() {
        assert_eq!(streak_and_record(&[], date(5)), (0, 0));
        assert!(weekly_trend(&[], date(5), TREND_WEEKS).is_empty());
    }

    #[test]
    fn single_checkin_today_counts_one() {
        assert_eq!(streak_and_record(&days(&[5]), date(5)), (1, 1));
    }

    #[test]
    fn gap_resets_streak_but_record_keeps_longest_run() {
        // Days 1,2,3 then 5: the gap at day 4 breaks the run, so on day 5
        // the streak is just {5} while the record remembers {1,2,3}.
        assert_eq!(streak_and_record(&days(&[1, 2, 3, 5]), date(5)), (1, 3));
    }

    #[test]
    fn streak_survives_when_last_checkin_was_yesterday() {
        assert_eq!(streak_and_record(&days(&[3, 4, 5]), date(6)), (3, 3));
    }

    #[test]
    fn stale_run_reports_zero_streak() {
        assert_eq!(streak_and_record(&days(&[3, 4, 5]), date(8)), (0, 3));
    }

    #[test]
    fn record_is_never_less_than_streak() {
        for sample in [vec![1, 2, 3, 5], vec![5], vec![2, 3, 4, 5], vec![1, 3, 5]] {
            let (streak, record) = streak_and_record(&days(&sample), date(5));
            assert!(record >= streak, "sample {sample:?}");
        }
    }

    #[test]
    fn trend_buckets_average_only_logged_days() {
        let checkins = vec![checkin(14, 2), checkin(15, 4), checkin(20, 5)];
        let trend = weekly_trend(&checkins, date(20), TREND_WEEKS);
        assert_eq!(trend.len(), TREND_WEEKS);

        // Current bucket: Jan 14..=20 holds all three check-ins.
        let current = trend.last().unwrap();
        assert_eq!(current.start_date, date(14));
        assert_eq!(current.completed_days, 3);
        assert_eq!(current.avg_rating, Some(11.0 / 3.0));

        // Previous bucket Jan 7..=13 has no data, not a zero average.
        let previous = &trend[TREND_WEEKS - 2];
        assert_eq!(previous.completed_days, 0);
        assert_eq!(previous.avg_rating, None);
    }

    #[test]
    fn checkin_exactly_seven_days_ago_lands_in_previous_bucket() {
        let checkins = vec![checkin(13, 3)];
        let trend = weekly_trend(&checkins, date(20), TREND_WEEKS);
        let current = trend.last().unwrap();
        let previous = &trend[TREND_WEEKS - 2];
        assert_eq!(current.completed_days, 0);
        assert_eq!(previous.completed_days, 1);
        assert_eq!(previous.end_date, date(13));
    }

    #[test]
    fn checkin_days_sorts_and_dedupes() {
        let checkins = vec![checkin(5, 3), checkin(2, 4), checkin(5, 1)];
        assert_eq!(checkin_days(&checkins), days(&[2, 5]));
    }
}
