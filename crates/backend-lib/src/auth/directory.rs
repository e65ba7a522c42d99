// ============================
// authgate-lib/src/auth/directory.rs
// ============================
//! User lookup + secret verification used by the Basic authenticator.
use crate::auth::password::verify_password;
use crate::storage::UserStore;
use crate::user::User;

/// Where credentials are checked
pub trait UserDirectory: Send + Sync {
    /// All users registered under `identifier`, empty if none
    fn find_by_identifier(&self, identifier: &str) -> Vec<User>;

    /// Whether `secret` is the password of `user`
    fn verify_secret(&self, user: &User, secret: &str) -> bool;
}

/// Every user store is a directory keyed by email
impl<T: UserStore + ?Sized> UserDirectory for T {
    fn find_by_identifier(&self, identifier: &str) -> Vec<User> {
        self.find_users_by_email(identifier)
    }

    fn verify_secret(&self, user: &User, secret: &str) -> bool {
        verify_password(&user.hashed_password, secret)
    }
}
