// ============================
// authgate-lib/src/auth/request.rs
// ============================
//! Read-only view of an inbound request's headers.
use std::collections::HashMap;
use axum::http::{header, HeaderMap};

/// Name of the header carrying credentials
pub const AUTHORIZATION: &str = "Authorization";

/// Header lookup capability
///
/// Implemented for axum's [`HeaderMap`] and for plain string maps so the
/// authenticators can run against in-memory requests.
pub trait RequestHeaders {
    /// Value of header `name`, `None` if absent or not valid text
    fn header(&self, name: &str) -> Option<&str>;
}

impl RequestHeaders for HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Case-insensitive on the header name, like HTTP
impl RequestHeaders for HashMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// The raw `Authorization` header of `request`
pub fn authorization_header<R: RequestHeaders + ?Sized>(request: Option<&R>) -> Option<&str> {
    request?.header(AUTHORIZATION)
}

/// Value of the cookie named `cookie_name`
pub fn session_cookie<'a, R: RequestHeaders + ?Sized>(
    request: Option<&'a R>,
    cookie_name: &str,
) -> Option<&'a str> {
    let cookies = request?.header(header::COOKIE.as_str())?;
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value)
}
