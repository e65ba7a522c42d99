// ================
// common/src/lib.rs
// ================
//! Common request and response bodies
//! shared between the `authgate` server and its clients.
//! Forms arrive URL-encoded, responses leave as JSON.

use serde::{Deserialize, Serialize};

/// Form posted to `POST /users`, `POST /sessions` and the session-auth login
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CredentialsForm {
    /// Account email, absent when the client omitted the field
    pub email: Option<String>,
    /// Plaintext password
    pub password: Option<String>,
}

/// Form posted to `POST /reset_password`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ResetRequestForm {
    pub email: Option<String>,
}

/// Form posted to `PUT /reset_password`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PasswordUpdateForm {
    pub email: Option<String>,
    pub reset_token: Option<String>,
    pub new_password: Option<String>,
}

/// Generic `{"message": ...}` body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

/// `{"email": ..., "message": ...}` body returned by account routes
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EmailMessageBody {
    pub email: String,
    pub message: String,
}

/// Body returned by `POST /reset_password`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResetTokenBody {
    pub email: String,
    pub reset_token: String,
}

/// Body returned by `GET /profile`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProfileBody {
    pub email: String,
}

/// Body returned by `GET /api/v1/status`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusBody {
    pub status: String,
}

/// Error body, e.g. `{"error": "Unauthorized"}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// Public view of a user account
///
/// Never carries the password hash, session id or reset token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserBody {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// RFC 3339 creation time
    pub created_at: String,
    /// RFC 3339 time of the last update
    pub updated_at: String,
}
