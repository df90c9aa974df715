use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::utils::validation::FieldError;

pub const SERVER_ERROR_MESSAGE: &str = "Server error";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Password or email is incorrect";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("validation failed ({} field errors)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("already authenticated")]
    AlreadyAuthenticated,

    #[error("duplicate email")]
    DuplicateEmail,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("artist already in favorites")]
    DuplicateFavorite,

    #[error("authentication required")]
    Unauthenticated,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("upstream authentication failed: {0}")]
    UpstreamAuth(String),

    #[error("upstream request '{operation}' failed: {reason}")]
    UpstreamRequest {
        operation: &'static str,
        reason: String,
    },

    #[error("database error: {0}")]
    Database(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn upstream(operation: &'static str, reason: impl ToString) -> Self {
        AppError::UpstreamRequest {
            operation,
            reason: reason.to_string(),
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => ErrorBody::message(msg),
            AppError::Validation(errors) => ErrorBody::Errors {
                errors: errors.clone(),
            },
            AppError::AlreadyAuthenticated => ErrorBody::message("You are already authenticated"),
            AppError::DuplicateEmail => ErrorBody::Errors {
                errors: vec![FieldError::new("email", DUPLICATE_EMAIL_MESSAGE)],
            },
            // Same body for unknown email and wrong password.
            AppError::InvalidCredentials => ErrorBody::Errors {
                errors: vec![FieldError::new("credentials", INVALID_CREDENTIALS_MESSAGE)],
            },
            AppError::DuplicateFavorite => ErrorBody::message("Artist already in favorites"),
            AppError::Unauthenticated => ErrorBody::message("Authentication required"),
            AppError::UpstreamAuth(_)
            | AppError::UpstreamRequest { .. }
            | AppError::Database(_)
            | AppError::Internal(_) => ErrorBody::message(SERVER_ERROR_MESSAGE),
        }
    }
}

/// JSON shape returned for every failed request.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ErrorBody {
    Message { message: String },
    Errors { errors: Vec<FieldError> },
}

impl ErrorBody {
    fn message(msg: impl Into<String>) -> Self {
        ErrorBody::Message {
            message: msg.into(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::Validation(_)
            | AppError::AlreadyAuthenticated
            | AppError::DuplicateEmail
            | AppError::InvalidCredentials
            | AppError::DuplicateFavorite => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamAuth(_)
            | AppError::UpstreamRequest { .. }
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("❌ {}", self);
        }
        HttpResponse::build(status).json(self.body())
    }
}
