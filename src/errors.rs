use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Migrate(sqlx::migrate::MigrateError),
    Config(String),
    Session(String),
    Hash(String),
    Validation(Vec<String>),
    Unauthorized(String),
    Conflict(String),
    TooManyAttempts,
    NotFound(String),
}

/// JSON error body. `error` is read by form clients, `message` by the admin
/// view; both carry the same text.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        ErrorBody {
            status: "error",
            error: text.clone(),
            message: text,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Migrate(e) => write!(f, "Migration error: {e}"),
            AppError::Config(e) => write!(f, "Configuration error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Validation(errors) => write!(f, "{}", errors.join("; ")),
            AppError::Unauthorized(msg) => write!(f, "{msg}"),
            AppError::Conflict(msg) => write!(f, "{msg}"),
            AppError::TooManyAttempts => {
                write!(f, "Too many failed login attempts. Please try again later.")
            }
            AppError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = if status.is_server_error() {
            log::error!("{self}");
            match self {
                AppError::Config(msg) => ErrorBody::new(msg.clone()),
                _ => ErrorBody::new("Internal server error"),
            }
        } else {
            ErrorBody::new(self.to_string())
        };
        HttpResponse::build(status).json(body)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        AppError::Migrate(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_unprocessable_and_joined() {
        let err = AppError::Validation(vec!["Email is required".into(), "Bad topic".into()]);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "Email is required; Bad topic");
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let err = AppError::Session("cookie decode failed".into());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_keeps_its_message() {
        let err = AppError::NotFound("Submission with ID x not found.".into());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Submission with ID x not found.");
    }
}
