// ============================
// authgate-lib/src/auth/mod.rs
// ============================
//! Authentication module.
pub mod basic;
pub mod directory;
pub mod exemption;
pub mod password;
pub mod request;
mod service;
pub mod session;

pub use basic::{credentials_from_header, BasicAuth, BasicAuthStep, Credentials};
pub use directory::UserDirectory;
pub use exemption::{requires_auth, ExemptionList, ExemptionPattern};
pub use password::{hash_password, verify_password, ScryptHasher, SecretHasher};
pub use request::{authorization_header, session_cookie, RequestHeaders};
pub use service::Authenticator;
pub use session::{Session, SessionAuth, SessionStore, DEFAULT_SESSION_NAME};
