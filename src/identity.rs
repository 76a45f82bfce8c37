use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::errors::AppError;
use crate::models::UserId;

/// Header carrying the authenticated user id, set by the identity proxy in
/// front of this service.
pub const USER_HEADER: &str = "x-user-id";

/// Extractor for the current user; a request without a usable identity is
/// answered with 401 before any handler logic runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| CurrentUser(UserId(value.to_string())))
            .ok_or(AppError::Unauthenticated)
    }
}
