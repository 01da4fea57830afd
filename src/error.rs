//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! failures from the record stores, input validation, the query translator and raw
//! statement execution.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return it
//! directly. Every error body has the shape `{"detail": "<message>"}`.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors` and
//! `bcrypt::BcryptError` allow conversion with the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Prefix shared by every failure of the natural-language query endpoint.
pub const QUERY_FAILED_PREFIX: &str = "Query execution failed: ";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// A client-side error due to a malformed or rejected request (HTTP 400).
    BadRequest(String),
    /// A requested resource was not found (HTTP 404).
    NotFound(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// An error originating from record store operations (HTTP 500).
    DatabaseError(String),
    /// Input validation failed (HTTP 422 Unprocessable Entity).
    ValidationError(String),
    /// The query translator could not produce a statement (HTTP 400).
    Translation(String),
    /// The store rejected or failed a translated statement (HTTP 400).
    QueryExecution(String),
}

impl AppError {
    /// The message placed in the `detail` field of the response body.
    pub fn detail(&self) -> String {
        match self {
            AppError::Translation(msg) | AppError::QueryExecution(msg) => {
                format!("{}{}", QUERY_FAILED_PREFIX, msg)
            }
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg)
            | AppError::DatabaseError(msg)
            | AppError::ValidationError(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Translation(msg) => write!(f, "Translation Error: {}", msg),
            AppError::QueryExecution(msg) => write!(f, "Query Execution Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Translation and execution failures are deliberately indistinguishable to the
/// client: both are reported as a 400 with the `Query execution failed:` prefix.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Translation(_) | AppError::QueryExecution(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "detail": self.detail()
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`. Unique, foreign key and check constraint
/// violations are the client's fault and become `BadRequest`. Everything else is
/// a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db_error)
                if db_error.is_unique_violation()
                    || db_error.is_foreign_key_violation()
                    || db_error.is_check_violation() =>
            {
                AppError::BadRequest(db_error.message().to_string())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
