// ============================
// crates/backend-lib/src/handlers/session_auth.rs
// ============================
//! Login and logout for cookie sessions.
use std::sync::Arc;
use axum::{
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    Form, Json,
};
use authgate_common::CredentialsForm;
use crate::auth::{verify_password, RequestHeaders};
use crate::error::AppError;
use crate::handlers::{required, set_cookie};
use crate::storage::UserStore;
use crate::AppState;

/// `POST /api/v1/auth_session/login`
pub async fn login<S: UserStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, AppError> {
    let email = required(form.email, "email")?;
    let password = required(form.password, "password")?;

    let users = state.users.find_users_by_email(&email);
    if users.is_empty() {
        return Err(AppError::UnknownUser);
    }
    let user = users
        .into_iter()
        .find(|u| verify_password(&u.hashed_password, &password))
        .ok_or(AppError::WrongPassword)?;

    let session_id = state.session_auth.sessions().create_session(user.id);
    tracing::info!(user_id = %user.id, "session opened");
    Ok((
        set_cookie(state.session_auth.cookie_name(), &session_id),
        Json(user.to_body()),
    ))
}

/// `DELETE /api/v1/auth_session/logout`
pub async fn logout<S: UserStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let request: &dyn RequestHeaders = &headers;
    if !state.session_auth.destroy_session(Some(request)) {
        return Err(AppError::NotFound("session".into()));
    }
    Ok(Json(serde_json::json!({})))
}
