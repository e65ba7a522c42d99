// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the `authgate` server.

pub mod auth;

pub use auth::{authenticate, CurrentUser};
