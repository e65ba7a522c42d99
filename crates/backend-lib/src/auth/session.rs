// ============================
// authgate-lib/src/auth/session.rs
// ============================
//! Session id handling and cookie-based authentication.
use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};
use dashmap::DashMap;
use metrics::{counter, gauge};
use uuid::Uuid;
use crate::auth::request::{session_cookie, RequestHeaders};
use crate::auth::service::Authenticator;
use crate::metrics::{AUTH_ACCEPTED, AUTH_REJECTED, SESSION_ACTIVE, SESSION_CREATED, SESSION_EXPIRED};
use crate::storage::UserStore;
use crate::user::{User, UserQuery};

/// Cookie carrying the session id unless configured otherwise
pub const DEFAULT_SESSION_NAME: &str = "_my_session_id";

/// Session information
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub created_at: SystemTime,
}

/// Process-wide store mapping session ids to user ids
///
/// Cloning yields another handle to the same sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
    /// `None` keeps sessions until destroyed
    ttl: Option<Duration>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SessionStore {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl: ttl.filter(|d| !d.is_zero()),
        }
    }

    /// Store with a TTL in seconds; `0` disables expiry
    pub fn with_ttl_secs(secs: u64) -> Self {
        Self::new(Some(Duration::from_secs(secs)))
    }

    /// Create a session for `user_id` and return its id
    pub fn create_session(&self, user_id: Uuid) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.sessions.insert(
            session_id.clone(),
            Session { user_id, created_at: SystemTime::now() },
        );

        counter!(SESSION_CREATED).increment(1);
        gauge!(SESSION_ACTIVE).set(self.sessions.len() as f64);

        session_id
    }

    /// User owning `session_id`; expired sessions are dropped and ignored
    pub fn user_id_for_session_id(&self, session_id: Option<&str>) -> Option<Uuid> {
        let session_id = session_id?;
        let session = self.sessions.get(session_id)?.value().clone();
        if self.is_expired(&session) {
            self.sessions.remove(session_id);
            counter!(SESSION_EXPIRED).increment(1);
            return None;
        }
        Some(session.user_id)
    }

    /// Remove `session_id`; `false` if it did not exist
    pub fn destroy(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            gauge!(SESSION_ACTIVE).set(self.sessions.len() as f64);
        }
        removed
    }

    /// Drop every expired session, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !self.is_expired(session));
        let removed = before.saturating_sub(self.sessions.len());

        if removed > 0 {
            counter!(SESSION_EXPIRED).increment(removed as u64);
            gauge!(SESSION_ACTIVE).set(self.sessions.len() as f64);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn is_expired(&self, session: &Session) -> bool {
        match self.ttl {
            Some(ttl) => session
                .created_at
                .elapsed()
                .map(|age| age >= ttl)
                .unwrap_or(false),
            None => false,
        }
    }
}

/// Cookie-based authenticator
#[derive(Clone)]
pub struct SessionAuth<S> {
    sessions: SessionStore,
    users: S,
    cookie_name: String,
}

impl<S: UserStore> SessionAuth<S> {
    pub fn new(sessions: SessionStore, users: S, cookie_name: impl Into<String>) -> Self {
        Self {
            sessions,
            users,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Log out: destroy the session named by the request cookie
    pub fn destroy_session(&self, request: Option<&dyn RequestHeaders>) -> bool {
        let Some(session_id) = session_cookie(request, &self.cookie_name) else {
            return false;
        };
        if self.sessions.user_id_for_session_id(Some(session_id)).is_none() {
            return false;
        }
        self.sessions.destroy(session_id)
    }
}

impl<S: UserStore> Authenticator for SessionAuth<S> {
    fn current_user(&self, request: Option<&dyn RequestHeaders>) -> Option<User> {
        let user = self
            .sessions
            .user_id_for_session_id(session_cookie(request, &self.cookie_name))
            .and_then(|id| self.users.find_user_by(&UserQuery::Id(id)).ok());

        if user.is_some() {
            counter!(AUTH_ACCEPTED, "scheme" => "session").increment(1);
        } else {
            counter!(AUTH_REJECTED, "scheme" => "session").increment(1);
        }
        user
    }
}
