// ============================
// authgate-lib/src/lib.rs
// ============================
//! Core functionality for the `authgate` authentication server.

pub mod accounts;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod redact;
pub mod router;
pub mod storage;
pub mod user;

use std::sync::Arc;
use crate::accounts::AccountService;
use crate::auth::{Authenticator, BasicAuth, ExemptionList, ScryptHasher, SessionAuth, SessionStore};
use crate::config::{AuthType, Settings};
use crate::error::AppError;
use crate::storage::UserStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// User storage backend
    pub users: S,
    /// Registration, account sessions and password resets
    pub accounts: Arc<AccountService<S, ScryptHasher>>,
    /// Session-auth sessions
    pub sessions: SessionStore,
    /// Authenticator guarding `/api/v1`; `None` disables the guard
    pub authenticator: Option<Arc<dyn Authenticator>>,
    /// Cookie authenticator backing the session-auth login and logout routes
    pub session_auth: SessionAuth<S>,
    /// Paths under `/api/v1` reachable without authentication
    pub exemptions: Arc<ExemptionList>,
    /// Settings in effect
    pub settings: Arc<Settings>,
}

impl<S: UserStore + Clone + 'static> AppState<S> {
    /// Create a new application state
    pub fn new(users: S, settings: &Settings) -> Result<Self, AppError> {
        let hasher = ScryptHasher::with_log_n(settings.scrypt_log_n)
            .map_err(|e| AppError::Config(e.to_string()))?;
        let sessions = SessionStore::with_ttl_secs(settings.session_ttl_secs);
        let session_auth = SessionAuth::new(sessions.clone(), users.clone(), settings.session_name.clone());

        let authenticator: Option<Arc<dyn Authenticator>> = match settings.auth_type {
            AuthType::None => None,
            AuthType::BasicAuth => Some(Arc::new(BasicAuth::new(users.clone()))),
            AuthType::SessionAuth => Some(Arc::new(session_auth.clone())),
        };
        tracing::info!(auth_type = ?settings.auth_type, "authenticator selected");

        Ok(Self {
            accounts: Arc::new(AccountService::new(users.clone(), hasher)),
            users,
            sessions,
            authenticator,
            session_auth,
            exemptions: Arc::new(ExemptionList::new(&settings.excluded_paths)),
            settings: Arc::new(settings.clone()),
        })
    }
}
