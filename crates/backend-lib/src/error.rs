// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use authgate_common::{ErrorBody, MessageBody};
use thiserror::Error;
use crate::storage::StoreError;

/// Application error types with error codes
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("email already registered")]
    EmailAlreadyRegistered(String),

    #[error("no user found for this email")]
    UnknownUser,

    #[error("wrong password")]
    WrongPassword,

    #[error("Invalid reset token")]
    InvalidResetToken,

    #[error("{0} missing")]
    MissingField(&'static str),

    #[error("Hashing error: {0}")]
    Hash(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::WrongPassword => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::InvalidResetToken => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::UnknownUser => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyRegistered(_)
            | AppError::MissingField(_)
            | AppError::Store(StoreError::Duplicate(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "AUTH_001",
            AppError::Forbidden => "AUTH_002",
            AppError::WrongPassword => "AUTH_003",
            AppError::InvalidResetToken => "AUTH_004",
            AppError::NotFound(_) => "NF_001",
            AppError::UnknownUser => "NF_002",
            AppError::EmailAlreadyRegistered(_) => "USER_001",
            AppError::MissingField(_) => "VAL_001",
            AppError::Hash(_) => "HASH_001",
            AppError::Config(_) => "CFG_001",
            AppError::Store(_) => "STORE_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::NotFound(_) | AppError::Store(StoreError::NotFound(_)) => "Not found".to_string(),
            AppError::Hash(_) | AppError::Config(_) | AppError::Store(_) | AppError::Io(_) | AppError::Json(_) => {
                "An internal server error occurred".to_string()
            },
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }

        if let AppError::EmailAlreadyRegistered(_) = self {
            let body = MessageBody { message: self.to_string() };
            return (status, Json(body)).into_response();
        }

        // Use detailed messages in development, sanitized in production
        let error = if cfg!(debug_assertions) && status.is_server_error() {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Hash(err.to_string())
    }
}
