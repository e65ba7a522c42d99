// ============================
// authgate-lib/src/user.rs
// ============================
//! User account model.
use authgate_common::UserBody;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// PHC string produced by a [`SecretHasher`](crate::auth::SecretHasher)
    pub hashed_password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub reset_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a fresh account with a random id
    pub fn new(email: impl Into<String>, hashed_password: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            hashed_password: hashed_password.into(),
            first_name: None,
            last_name: None,
            session_id: None,
            reset_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Human readable name built from whatever the account carries
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => self.email.clone(),
        }
    }

    /// Public JSON view
    pub fn to_body(&self) -> UserBody {
        UserBody {
            id: self.id.to_string(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            created_at: self.created_at.to_rfc3339(),
            updated_at: self.updated_at.to_rfc3339(),
        }
    }
}

/// Lookup key for [`UserStore::find_user_by`](crate::storage::UserStore::find_user_by)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserQuery {
    Id(Uuid),
    Email(String),
    SessionId(String),
    ResetToken(String),
}

impl UserQuery {
    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserQuery::Id(id) => user.id == *id,
            UserQuery::Email(email) => user.email == *email,
            UserQuery::SessionId(sid) => user.session_id.as_deref() == Some(sid.as_str()),
            UserQuery::ResetToken(token) => user.reset_token.as_deref() == Some(token.as_str()),
        }
    }
}

/// Partial update applied by [`UserStore::update_user`](crate::storage::UserStore::update_user)
///
/// `None` leaves a field untouched; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub hashed_password: Option<String>,
    pub session_id: Option<Option<String>>,
    pub reset_token: Option<Option<String>>,
}

impl UserUpdate {
    pub fn session_id(session_id: Option<String>) -> Self {
        Self { session_id: Some(session_id), ..Self::default() }
    }

    pub fn reset_token(reset_token: Option<String>) -> Self {
        Self { reset_token: Some(reset_token), ..Self::default() }
    }

    /// New password hash; also consumes any pending reset token
    pub fn password_reset(hashed_password: String) -> Self {
        Self {
            hashed_password: Some(hashed_password),
            reset_token: Some(None),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, user: &mut User) {
        if let Some(hash) = self.hashed_password {
            user.hashed_password = hash;
        }
        if let Some(sid) = self.session_id {
            user.session_id = sid;
        }
        if let Some(token) = self.reset_token {
            user.reset_token = token;
        }
        user.updated_at = Utc::now();
    }
}
