use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route("/api/habits/:id", get(handlers::get_habit))
        .route("/api/habits/:id/checkin", post(handlers::submit_checkin))
        .with_state(state)
}
