// ==============
// authgate-lib/src/metrics.rs

//! Central place for metric keys
pub const AUTH_ACCEPTED: &str = "auth.accepted";
pub const AUTH_REJECTED: &str = "auth.rejected";
pub const SESSION_CREATED: &str = "session.created";
pub const SESSION_EXPIRED: &str = "session.expired";
pub const SESSION_ACTIVE: &str = "session.active";
pub const USER_REGISTERED: &str = "user.registered";
pub const LOGIN_FAILED: &str = "login.failed";
pub const PASSWORD_RESET: &str = "password.reset";
