use tracing::error;

use crate::day::DayKey;
use crate::errors::AppError;
use crate::models::{Checkin, Habit, HabitView};
use crate::progress::compute_progress;
use crate::stats::{checkin_days, streak_and_record, weekly_trend, TREND_WEEKS};

/// Builds the read model for one habit from a consistent snapshot. If the
/// stored score has drifted from the check-in count the read fails instead
/// of showing numbers that contradict each other.
pub fn build_habit_view(
    habit: &Habit,
    checkins: &[Checkin],
    today: DayKey,
) -> Result<HabitView, AppError> {
    if habit.score != checkins.len() as u64 {
        error!(
            habit_id = habit.id.0,
            score = habit.score,
            checkins = checkins.len(),
            "habit score does not match check-in count"
        );
        return Err(AppError::Consistency);
    }

    let days = checkin_days(checkins);
    let (streak, record) = streak_and_record(&days, today);
    let progress = compute_progress(habit.start_date, habit.end_date, days.len() as u32, today);
    let has_checked_in_today = days.binary_search(&today).is_ok();

    Ok(HabitView {
        id: habit.id,
        name: habit.name.clone(),
        description: habit.description.clone(),
        start_date: habit.start_date,
        end_date: habit.end_date,
        score: habit.score,
        total_days: progress.total_days,
        days_passed: progress.days_passed,
        completed_days: progress.completed_days,
        progress_percent: progress.progress_percent,
        adherence_percent: progress.adherence_percent,
        average: progress.average,
        streak,
        record,
        weekly_trend: weekly_trend(checkins, today, TREND_WEEKS),
        has_checked_in_today,
    })
}
