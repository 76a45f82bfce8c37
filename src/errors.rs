use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Error taxonomy for the API surface. Check-in rejections (including the
/// duplicate-day conflict) are not errors at all; they travel as a rejected
/// outcome body. Consistency faults degrade to a generic message with the
/// detail in the logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("couldn't load habit stats")]
    Consistency,
    #[error("storage error: {0}")]
    Store(#[from] std::io::Error),
    #[error("failed to encode data: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("not signed in")]
    Unauthenticated,
    #[error("habit not found")]
    NotFound,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Consistency | Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
