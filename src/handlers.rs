use crate::day;
use crate::errors::AppError;
use crate::identity::CurrentUser;
use crate::models::{
    AppData, CheckinOutcome, CheckinRequest, Habit, HabitId, HabitView, NewHabit, NewHabitRequest,
    RecordCheckinError, UserId,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::validator::{validate, ProposedCheckin, RejectReason};
use crate::views::build_habit_view;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

pub async fn list_habits(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<HabitView>>, AppError> {
    let today = day::today();
    let data = state.data.lock().await;
    let views = data
        .list_habits(&user)
        .map(|habit| build_habit_view(habit, data.checkins_for(habit.id), today))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(views))
}

pub async fn create_habit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<NewHabitRequest>,
) -> Result<Json<Habit>, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("habit name must not be empty"));
    }
    let start_date = payload.start_date.unwrap_or_else(day::today);
    if payload.end_date <= start_date {
        return Err(AppError::validation("end date must be after the start date"));
    }
    let description = payload
        .description
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    let mut data = state.data.lock().await;
    let mut working = data.clone();
    let habit = working
        .insert_habit(
            user,
            NewHabit {
                name,
                description,
                start_date,
                end_date: payload.end_date,
            },
        )
        .clone();

    persist_data(&state.data_path, &working).await?;
    *data = working;

    Ok(Json(habit))
}

pub async fn get_habit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<u64>,
) -> Result<Json<HabitView>, AppError> {
    let today = day::today();
    let data = state.data.lock().await;
    let habit = owned_habit(&data, HabitId(id), &user)?;
    let view = build_habit_view(habit, data.checkins_for(habit.id), today)?;
    Ok(Json(view))
}

pub async fn submit_checkin(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<u64>,
    Json(payload): Json<CheckinRequest>,
) -> Result<Json<CheckinOutcome>, AppError> {
    let now = Utc::now();
    let habit_id = HabitId(id);

    let mut data = state.data.lock().await;
    let habit = owned_habit(&data, habit_id, &user)?;
    let proposed = ProposedCheckin {
        rating: payload.rating,
        reflection: &payload.reflection,
        timestamp: now,
    };
    if let Err(reason) = validate(habit, data.checkins_for(habit_id), &proposed) {
        return Ok(Json(CheckinOutcome::rejected(reason)));
    }

    // Mutate a working copy and commit only after the persist succeeds, so
    // an I/O failure leaves neither a phantom check-in nor a drifted score.
    let mut working = data.clone();
    let checkin = match working.record_checkin(
        habit_id,
        payload.rating as u8,
        payload.reflection.trim().to_string(),
        now,
    ) {
        Ok(checkin) => checkin,
        // The store's own uniqueness check answers like the validator.
        Err(RecordCheckinError::DuplicateDay) => {
            return Ok(Json(CheckinOutcome::rejected(
                RejectReason::AlreadyCheckedInToday,
            )))
        }
        Err(RecordCheckinError::UnknownHabit) => return Err(AppError::NotFound),
    };

    persist_data(&state.data_path, &working).await?;
    *data = working;

    let habit = data.get_habit(habit_id).ok_or(AppError::NotFound)?;
    let view = build_habit_view(habit, data.checkins_for(habit_id), day::day_key(now))?;
    Ok(Json(CheckinOutcome::Accepted { checkin, view }))
}

fn owned_habit<'a>(data: &'a AppData, id: HabitId, user: &UserId) -> Result<&'a Habit, AppError> {
    // A foreign habit answers the same 404 as a missing one.
    data.get_habit(id)
        .filter(|habit| &habit.owner == user)
        .ok_or(AppError::NotFound)
}
