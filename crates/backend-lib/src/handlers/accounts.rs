// ============================
// crates/backend-lib/src/handlers/accounts.rs
// ============================
//! Account routes: registration, login sessions and password resets.
use std::sync::Arc;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use authgate_common::{
    CredentialsForm, EmailMessageBody, MessageBody, PasswordUpdateForm, ProfileBody, ResetRequestForm,
    ResetTokenBody,
};
use crate::auth::session_cookie;
use crate::error::AppError;
use crate::handlers::{required, set_cookie};
use crate::storage::UserStore;
use crate::AppState;

/// Cookie carrying the account session id
pub const ACCOUNT_SESSION_COOKIE: &str = "session_id";

/// `GET /`
pub async fn index() -> Json<MessageBody> {
    Json(MessageBody { message: "Bienvenue".to_string() })
}

/// `POST /users`
pub async fn register<S: UserStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Form(form): Form<CredentialsForm>,
) -> Result<Json<EmailMessageBody>, AppError> {
    let email = required(form.email, "email")?;
    let password = required(form.password, "password")?;

    let user = state.accounts.register_user(&email, &password)?;
    Ok(Json(EmailMessageBody {
        email: user.email,
        message: "user created".to_string(),
    }))
}

/// `POST /sessions`
pub async fn login<S: UserStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, AppError> {
    let email = required(form.email, "email")?;
    let password = required(form.password, "password")?;

    if !state.accounts.valid_login(&email, &password) {
        return Err(AppError::Unauthorized);
    }
    let session_id = state.accounts.create_session(&email).ok_or(AppError::Unauthorized)?;
    Ok((
        set_cookie(ACCOUNT_SESSION_COOKIE, &session_id),
        Json(EmailMessageBody {
            email,
            message: "logged in".to_string(),
        }),
    ))
}

/// `DELETE /sessions`
pub async fn logout<S: UserStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    let user = state
        .accounts
        .get_user_from_session_id(session_cookie(Some(&headers), ACCOUNT_SESSION_COOKIE))
        .ok_or(AppError::Forbidden)?;
    state.accounts.destroy_session(user.id);
    Ok(Redirect::to("/"))
}

/// `GET /profile`
pub async fn profile<S: UserStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Json<ProfileBody>, AppError> {
    let user = state
        .accounts
        .get_user_from_session_id(session_cookie(Some(&headers), ACCOUNT_SESSION_COOKIE))
        .ok_or(AppError::Forbidden)?;
    Ok(Json(ProfileBody { email: user.email }))
}

/// `POST /reset_password`
pub async fn get_reset_password_token<S: UserStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Form(form): Form<ResetRequestForm>,
) -> Result<Json<ResetTokenBody>, AppError> {
    let email = required(form.email, "email")?;
    let reset_token = state
        .accounts
        .get_reset_password_token(&email)
        .map_err(|_| AppError::Forbidden)?;
    Ok(Json(ResetTokenBody { email, reset_token }))
}

/// `PUT /reset_password`
pub async fn update_password<S: UserStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Form(form): Form<PasswordUpdateForm>,
) -> Result<Json<EmailMessageBody>, AppError> {
    let email = required(form.email, "email")?;
    let reset_token = required(form.reset_token, "reset_token")?;
    let new_password = required(form.new_password, "new_password")?;

    state
        .accounts
        .update_password(&reset_token, &new_password)
        .map_err(|e| match e {
            AppError::InvalidResetToken => AppError::Forbidden,
            other => other,
        })?;
    Ok(Json(EmailMessageBody {
        email,
        message: "Password updated".to_string(),
    }))
}
