// =========================
// tests/unit/error_tests.rs
// =========================
//! Unit tests for the error module
use authgate_lib::error::AppError;
use authgate_lib::storage::StoreError;
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[test]
fn test_app_error_display() {
    assert_eq!(AppError::UnknownUser.to_string(), "no user found for this email");
    assert_eq!(AppError::WrongPassword.to_string(), "wrong password");
    assert_eq!(AppError::MissingField("password").to_string(), "password missing");
    assert_eq!(
        AppError::EmailAlreadyRegistered("bob@me.com".into()).to_string(),
        "email already registered"
    );
}

#[test]
fn test_app_error_status_codes() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::WrongPassword, StatusCode::UNAUTHORIZED),
        (AppError::Forbidden, StatusCode::FORBIDDEN),
        (AppError::UnknownUser, StatusCode::NOT_FOUND),
        (AppError::MissingField("email"), StatusCode::BAD_REQUEST),
        (AppError::Store(StoreError::Duplicate("x".into())), StatusCode::BAD_REQUEST),
        (AppError::Config("bad".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (error, status) in cases {
        assert_eq!(error.status_code(), status, "{error}");
        assert_eq!(error.into_response().status(), status);
    }
}

#[test]
fn test_error_codes_are_distinct() {
    let codes = [
        AppError::Unauthorized.error_code(),
        AppError::Forbidden.error_code(),
        AppError::WrongPassword.error_code(),
        AppError::InvalidResetToken.error_code(),
        AppError::UnknownUser.error_code(),
        AppError::MissingField("email").error_code(),
    ];
    for (i, code) in codes.iter().enumerate() {
        assert!(!codes[i + 1..].contains(code), "{code} repeated");
    }
}

#[test]
fn test_sanitized_message_hides_internals() {
    let error = AppError::Config("secret path /etc/authgate".into());
    assert_eq!(error.sanitized_message(), "An internal server error occurred");
    assert_eq!(AppError::Forbidden.sanitized_message(), "Forbidden");
}
