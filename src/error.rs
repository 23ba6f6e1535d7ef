//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management so that every handler reports
//! failures the same way: a JSON body of the form `{"error": "<message>"}`
//! with the status code of the matching variant.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so handlers and
//! middleware can return it (directly or via `?`) and Actix Web converts it
//! into the HTTP response. Store and hashing failures are wrapped through the
//! [`AppError::database`] and [`AppError::internal`] constructors, which log
//! the underlying cause server-side and keep the client-visible message
//! generic.

use actix_web::{error::ResponseError, HttpResponse};
use log::error;
use serde_json::json;
use std::fmt;

/// Represents all possible errors that can occur within the application.
///
/// Each variant carries the client-visible message; diagnostic detail never
/// travels past the constructors that log it.
#[derive(Debug)]
pub enum AppError {
    /// A required request field is absent or empty (HTTP 400).
    Validation(String),
    /// Registration attempted with an email that already has an account (HTTP 400).
    DuplicateEmail(String),
    /// Login failed. Unknown email and wrong password are reported
    /// identically so the response does not reveal which part was wrong
    /// (HTTP 401).
    InvalidCredentials(String),
    /// A protected route was called without a valid session (HTTP 401).
    /// Covers a missing cookie as well as an expired or unknown session.
    Unauthenticated(String),
    /// The requested row does not exist, or exists but is not owned by the
    /// caller. The two cases are indistinguishable on purpose (HTTP 404).
    NotFound(String),
    /// An unexpected server-side failure outside the store (HTTP 500).
    Internal(String),
    /// A store operation failed unexpectedly (HTTP 500).
    Database(String),
}

impl AppError {
    /// Wraps a failed store operation. The cause is logged with the given
    /// context; the client only ever sees the context string.
    pub fn database(message: &str, cause: sqlx::Error) -> Self {
        error!("{}: {}", message, cause);
        AppError::Database(message.to_string())
    }

    /// Wraps any other unexpected failure the same way.
    pub fn internal(message: &str, cause: impl fmt::Display) -> Self {
        error!("{}: {}", message, cause);
        AppError::Internal(message.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DuplicateEmail(msg) => write!(f, "Duplicate Email: {}", msg),
            AppError::InvalidCredentials(msg) => write!(f, "Invalid Credentials: {}", msg),
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate `AppError`
/// results from handlers into the correct HTTP status codes and JSON error
/// responses.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) | AppError::DuplicateEmail(msg) => {
                HttpResponse::BadRequest().json(json!({
                    "error": msg
                }))
            }
            AppError::InvalidCredentials(msg) | AppError::Unauthenticated(msg) => {
                HttpResponse::Unauthorized().json(json!({
                    "error": msg
                }))
            }
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            // Database errors are presented as generic internal server errors
            // to the client; the detail was already logged.
            AppError::Internal(msg) | AppError::Database(msg) => {
                HttpResponse::InternalServerError().json(json!({
                    "error": msg
                }))
            }
        }
    }
}
