// ============================
// authgate-lib/src/accounts.rs
// ============================
//! Account lifecycle: registration, login sessions and password resets.
use metrics::counter;
use uuid::Uuid;
use crate::auth::SecretHasher;
use crate::error::AppError;
use crate::metrics::{LOGIN_FAILED, PASSWORD_RESET, USER_REGISTERED};
use crate::storage::{StoreError, UserStore};
use crate::user::{User, UserQuery, UserUpdate};

/// Account operations over a user store
pub struct AccountService<S, H> {
    users: S,
    hasher: H,
}

impl<S: UserStore, H: SecretHasher> AccountService<S, H> {
    pub fn new(users: S, hasher: H) -> Self {
        Self { users, hasher }
    }

    pub fn users(&self) -> &S {
        &self.users
    }

    /// Register `email` with a hash of `password`
    pub fn register_user(&self, email: &str, password: &str) -> Result<User, AppError> {
        if self.users.find_user_by(&UserQuery::Email(email.to_string())).is_ok() {
            return Err(AppError::EmailAlreadyRegistered(email.to_string()));
        }
        let hashed = self.hasher.hash(password)?;
        let user = self.users.add_user(email, &hashed).map_err(|e| match e {
            StoreError::Duplicate(email) => AppError::EmailAlreadyRegistered(email),
            other => AppError::Store(other),
        })?;

        counter!(USER_REGISTERED).increment(1);
        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Whether `password` matches the account registered under `email`
    pub fn valid_login(&self, email: &str, password: &str) -> bool {
        let valid = self
            .users
            .find_user_by(&UserQuery::Email(email.to_string()))
            .map(|user| self.hasher.verify(&user.hashed_password, password))
            .unwrap_or(false);
        if !valid {
            counter!(LOGIN_FAILED).increment(1);
        }
        valid
    }

    /// Start a login session for `email`; `None` if no such user
    pub fn create_session(&self, email: &str) -> Option<String> {
        let user = self.users.find_user_by(&UserQuery::Email(email.to_string())).ok()?;
        let session_id = Uuid::new_v4().to_string();
        self.users
            .update_user(user.id, UserUpdate::session_id(Some(session_id.clone())))
            .ok()?;
        Some(session_id)
    }

    pub fn get_user_from_session_id(&self, session_id: Option<&str>) -> Option<User> {
        let session_id = session_id?;
        self.users
            .find_user_by(&UserQuery::SessionId(session_id.to_string()))
            .ok()
    }

    /// End the login session of `user_id`; unknown ids are ignored
    pub fn destroy_session(&self, user_id: Uuid) {
        if let Err(e) = self.users.update_user(user_id, UserUpdate::session_id(None)) {
            tracing::debug!(%user_id, error = %e, "no session to destroy");
        }
    }

    /// Issue a fresh reset token for `email`
    pub fn get_reset_password_token(&self, email: &str) -> Result<String, AppError> {
        let user = self
            .users
            .find_user_by(&UserQuery::Email(email.to_string()))
            .map_err(|_| AppError::UnknownUser)?;
        let token = Uuid::new_v4().to_string();
        self.users
            .update_user(user.id, UserUpdate::reset_token(Some(token.clone())))?;
        Ok(token)
    }

    /// Replace the password of the account holding `reset_token`
    pub fn update_password(&self, reset_token: &str, password: &str) -> Result<(), AppError> {
        let user = self
            .users
            .find_user_by(&UserQuery::ResetToken(reset_token.to_string()))
            .map_err(|_| AppError::InvalidResetToken)?;
        let hashed = self.hasher.hash(password)?;
        self.users.update_user(user.id, UserUpdate::password_reset(hashed))?;

        counter!(PASSWORD_RESET).increment(1);
        tracing::info!(user_id = %user.id, "password updated");
        Ok(())
    }
}
