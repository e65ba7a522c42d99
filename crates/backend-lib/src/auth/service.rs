// =============
// authgate-lib/src/auth/service.rs
// =============
//! This module defines the `Authenticator` trait, which resolves a request to a user
use crate::auth::request::RequestHeaders;
use crate::user::User;

pub trait Authenticator: Send + Sync {
    /// The user behind `request`, `None` for any kind of failure
    fn current_user(&self, request: Option<&dyn RequestHeaders>) -> Option<User>;
}
