// ============================
// authgate-lib/src/auth/basic.rs
// ============================
//! HTTP Basic authentication.
//!
//! Credentials travel as `Authorization: Basic base64(identifier:secret)`.
//! Decoding runs in three total stages (scheme strip, base64 decode, pair
//! split); any stage returning `None` rejects the request. Rejections all
//! look the same to the caller, whichever step failed.
use std::fmt;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use metrics::counter;
use zeroize::Zeroizing;
use crate::auth::directory::UserDirectory;
use crate::auth::request::{authorization_header, RequestHeaders};
use crate::auth::service::Authenticator;
use crate::metrics::{AUTH_ACCEPTED, AUTH_REJECTED};
use crate::user::User;

const BASIC_PREFIX: &str = "Basic ";

/// Identifier/secret pair pulled out of a Basic header
///
/// The secret is wiped from memory on drop and never shown by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub secret: Zeroizing<String>,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: Zeroizing::new(secret.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Token following `Basic ` in an authorization value
///
/// Only the element right after the scheme is returned; anything after a
/// further space is dropped.
pub fn extract_base64_authorization_header(header: Option<&str>) -> Option<&str> {
    let header = header?;
    if !header.starts_with(BASIC_PREFIX) {
        return None;
    }
    header.split(' ').nth(1)
}

/// Standard base64 decode of `token` into UTF-8 text
pub fn decode_base64_authorization_header(token: Option<&str>) -> Option<String> {
    let bytes = STANDARD.decode(token?).ok()?;
    String::from_utf8(bytes).ok()
}

/// Split decoded text on its first `:`; secrets may contain further colons
pub fn extract_user_credentials(decoded: Option<&str>) -> Option<Credentials> {
    let (identifier, secret) = decoded?.split_once(':')?;
    Some(Credentials::new(identifier, secret))
}

/// Full decode pipeline for a raw `Authorization` value
pub fn credentials_from_header(header: Option<&str>) -> Option<Credentials> {
    let token = extract_base64_authorization_header(header)?;
    let decoded = Zeroizing::new(decode_base64_authorization_header(Some(token))?);
    extract_user_credentials(Some(decoded.as_str()))
}

/// Step reached by a Basic authentication attempt
///
/// Only used for logs and metrics; callers see a user or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicAuthStep {
    NoHeader,
    Decoding,
    CredentialsExtracted,
    Authenticated,
}

impl BasicAuthStep {
    fn as_str(self) -> &'static str {
        match self {
            BasicAuthStep::NoHeader => "no_header",
            BasicAuthStep::Decoding => "decoding",
            BasicAuthStep::CredentialsExtracted => "credentials_extracted",
            BasicAuthStep::Authenticated => "authenticated",
        }
    }
}

/// Basic authenticator backed by a [`UserDirectory`]
#[derive(Clone)]
pub struct BasicAuth<D> {
    directory: D,
}

impl<D: UserDirectory> BasicAuth<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// First user under `identifier` whose password is `secret`
    pub fn user_object_from_credentials(&self, identifier: &str, secret: &str) -> Option<User> {
        self.directory
            .find_by_identifier(identifier)
            .into_iter()
            .find(|user| self.directory.verify_secret(user, secret))
    }

    /// Resolve `request` to a user, recording the step reached
    pub fn resolve(&self, request: Option<&dyn RequestHeaders>) -> (BasicAuthStep, Option<User>) {
        let Some(header) = authorization_header(request) else {
            return (BasicAuthStep::NoHeader, None);
        };
        let Some(credentials) = credentials_from_header(Some(header)) else {
            return (BasicAuthStep::Decoding, None);
        };
        match self.user_object_from_credentials(&credentials.identifier, &credentials.secret) {
            Some(user) => (BasicAuthStep::Authenticated, Some(user)),
            None => (BasicAuthStep::CredentialsExtracted, None),
        }
    }
}

impl<D: UserDirectory> Authenticator for BasicAuth<D> {
    fn current_user(&self, request: Option<&dyn RequestHeaders>) -> Option<User> {
        let (step, user) = self.resolve(request);
        if user.is_some() {
            counter!(AUTH_ACCEPTED, "scheme" => "basic").increment(1);
        } else {
            counter!(AUTH_REJECTED, "scheme" => "basic", "step" => step.as_str()).increment(1);
            tracing::debug!(step = step.as_str(), "basic authentication rejected");
        }
        user
    }
}
