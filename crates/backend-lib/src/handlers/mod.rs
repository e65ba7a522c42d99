// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers.
pub mod accounts;
pub mod index;
pub mod session_auth;

use axum::http::{header, HeaderName};
use crate::error::AppError;

/// A form field that must be present and non-empty
pub(crate) fn required(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    value.filter(|v| !v.is_empty()).ok_or(AppError::MissingField(field))
}

/// `Set-Cookie` header for a session id
pub(crate) fn set_cookie(name: &str, value: &str) -> [(HeaderName, String); 1] {
    [(header::SET_COOKIE, format!("{name}={value}; Path=/; HttpOnly"))]
}
