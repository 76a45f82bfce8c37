use crate::day::DayKey;

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub total_days: i64,
    pub days_passed: i64,
    pub completed_days: u32,
    /// Calendar time elapsed over the habit's span, 0..=100.
    pub progress_percent: f64,
    /// Days actually logged over the habit's span, 0..=100. Not the same
    /// quantity as `progress_percent` and never interchangeable with it.
    pub adherence_percent: f64,
    /// Completed days per elapsed day; 0 before the habit starts.
    pub average: f64,
}

pub fn compute_progress(
    start_date: DayKey,
    end_date: DayKey,
    completed_days: u32,
    today: DayKey,
) -> Progress {
    // Floor at 1 so a start==end habit cannot divide by zero downstream.
    let total_days = (end_date - start_date).num_days().max(1);
    let days_passed = (today - start_date).num_days().clamp(0, total_days);

    let progress_percent = days_passed as f64 / total_days as f64 * 100.0;
    let adherence_percent = (f64::from(completed_days) / total_days as f64 * 100.0).min(100.0);
    let average = if days_passed == 0 {
        0.0
    } else {
        f64::from(completed_days) / days_passed as f64
    };

    Progress {
        total_days,
        days_passed,
        completed_days,
        progress_percent,
        adherence_percent,
        average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> DayKey {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn mid_habit_snapshot() {
        let p = compute_progress(date(2024, 1, 1), date(2024, 1, 10), 3, date(2024, 1, 5));
        assert_eq!(p.total_days, 9);
        assert_eq!(p.days_passed, 4);
        assert!((p.progress_percent - 44.4).abs() < 0.1);
        assert!((p.average - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn before_start_everything_is_zero() {
        let p = compute_progress(date(2024, 1, 10), date(2024, 1, 20), 0, date(2024, 1, 5));
        assert_eq!(p.days_passed, 0);
        assert_eq!(p.progress_percent, 0.0);
        assert_eq!(p.average, 0.0);
    }

    #[test]
    fn after_end_progress_caps_at_hundred() {
        let p = compute_progress(date(2024, 1, 1), date(2024, 1, 10), 5, date(2024, 3, 1));
        assert_eq!(p.days_passed, p.total_days);
        assert_eq!(p.progress_percent, 100.0);
    }

    #[test]
    fn same_day_span_does_not_divide_by_zero() {
        let p = compute_progress(date(2024, 1, 1), date(2024, 1, 1), 0, date(2024, 1, 1));
        assert_eq!(p.total_days, 1);
        assert_eq!(p.progress_percent, 0.0);
    }

    #[test]
    fn adherence_and_time_progress_diverge() {
        // Halfway through the span but only one day logged.
        let p = compute_progress(date(2024, 1, 1), date(2024, 1, 11), 1, date(2024, 1, 6));
        assert_eq!(p.days_passed, 5);
        assert_eq!(p.progress_percent, 50.0);
        assert_eq!(p.adherence_percent, 10.0);
    }

    #[test]
    fn full_adherence_on_inclusive_end_day_stays_capped() {
        // start..=end allows total_days + 1 logged days; percent is capped.
        let p = compute_progress(date(2024, 1, 1), date(2024, 1, 3), 3, date(2024, 1, 3));
        assert_eq!(p.total_days, 2);
        assert_eq!(p.adherence_percent, 100.0);
    }
}
