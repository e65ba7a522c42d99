// ============================
// authgate-lib/src/router.rs
// ============================
//! HTTP router assembly.
use std::sync::Arc;
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    normalize_path::NormalizePath,
    trace::TraceLayer,
};
use crate::error::AppError;
use crate::handlers::{accounts, index, session_auth};
use crate::storage::UserStore;
use crate::AppState;

/// Application service: the router behind trailing-slash trimming
pub type App = NormalizePath<Router>;

/// Create the application service
///
/// Trimming runs before routing, so `/api/v1/status/` and `/api/v1/status`
/// reach the same handler.
pub fn create_app<S: UserStore + Clone + 'static>(state: Arc<AppState<S>>) -> App {
    NormalizePath::trim_trailing_slash(create_router(state))
}

/// Create the application router
///
/// `/api/v1` sits behind the authentication middleware, fallback included,
/// so unknown API paths are only revealed to authenticated callers. The
/// account routes at the root are public.
pub fn create_router<S: UserStore + Clone + 'static>(state: Arc<AppState<S>>) -> Router {
    let api = Router::new()
        .route("/status", get(index::status))
        .route("/unauthorized", get(index::unauthorized))
        .route("/forbidden", get(index::forbidden))
        .route("/users/me", get(index::me))
        .route("/auth_session/login", post(session_auth::login::<S>))
        .route("/auth_session/logout", delete(session_auth::logout::<S>))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), crate::middleware::authenticate::<S>));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(accounts::index))
        .route("/users", post(accounts::register::<S>))
        .route("/sessions", post(accounts::login::<S>).delete(accounts::logout::<S>))
        .route("/profile", get(accounts::profile::<S>))
        .route(
            "/reset_password",
            post(accounts::get_reset_password_token::<S>).put(accounts::update_password::<S>),
        )
        .nest("/api/v1", api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("route".into())
}
