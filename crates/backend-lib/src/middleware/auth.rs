//! Before-request authentication guard.
use std::sync::Arc;
use axum::{
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::Response,
};
use crate::auth::{authorization_header, session_cookie, RequestHeaders};
use crate::error::AppError;
use crate::storage::UserStore;
use crate::user::User;
use crate::AppState;

/// The user resolved for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authentication middleware
///
/// Exempt paths and a disabled authenticator pass straight through. Otherwise
/// a request carrying neither credentials nor a session cookie is rejected
/// with 401, one whose credentials resolve to no user with 403.
pub async fn authenticate<S: UserStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(authenticator) = state.authenticator.as_ref() else {
        return Ok(next.run(request).await);
    };

    // nested routers see a stripped uri
    let guarded = {
        let path = request
            .extensions()
            .get::<OriginalUri>()
            .map_or_else(|| request.uri().path(), |original| original.0.path());
        state.exemptions.requires_auth(Some(path))
    };
    if !guarded {
        return Ok(next.run(request).await);
    }

    let user = {
        let headers: &dyn RequestHeaders = request.headers();
        if authorization_header(Some(headers)).is_none()
            && session_cookie(Some(headers), state.session_auth.cookie_name()).is_none()
        {
            return Err(AppError::Unauthorized);
        }
        authenticator
            .current_user(Some(headers))
            .ok_or(AppError::Forbidden)?
    };

    tracing::debug!(user_id = %user.id, "request authenticated");
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
