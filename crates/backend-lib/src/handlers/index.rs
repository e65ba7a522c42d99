// ============================
// crates/backend-lib/src/handlers/index.rs
// ============================
//! Status and probe routes under `/api/v1`.
use axum::{Extension, Json};
use authgate_common::{StatusBody, UserBody};
use crate::error::AppError;
use crate::middleware::CurrentUser;

/// `GET /api/v1/status`
pub async fn status() -> Json<StatusBody> {
    Json(StatusBody { status: "OK".to_string() })
}

/// `GET /api/v1/unauthorized`
pub async fn unauthorized() -> AppError {
    AppError::Unauthorized
}

/// `GET /api/v1/forbidden`
pub async fn forbidden() -> AppError {
    AppError::Forbidden
}

/// `GET /api/v1/users/me`
pub async fn me(current: Option<Extension<CurrentUser>>) -> Result<Json<UserBody>, AppError> {
    let Extension(CurrentUser(user)) = current.ok_or_else(|| AppError::NotFound("current user".into()))?;
    Ok(Json(user.to_body()))
}
