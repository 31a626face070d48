//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across the core and web crates. It follows the `thiserror` pattern for ergonomic
//! error handling.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx) - User/input issues
//!    - [`Validation`](AppError::Validation) → 400 Bad Request
//!    - [`DuplicateKey`](AppError::DuplicateKey) → 400 Bad Request
//!    - [`Authentication`](AppError::Authentication) → 400 Bad Request
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!
//! 2. **Server Errors** (5xx) - Internal/system issues
//!    - [`Store`](AppError::Store) → 500 Internal Server Error
//!    - [`Timeout`](AppError::Timeout) → 503 Service Unavailable
//!    - [`Config`](AppError::Config) / [`Internal`](AppError::Internal) → 500
//!
//! Server errors never leak their detail to the client; the detail is logged.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_title(title: &str) -> Result<()> {
//!     if title.is_empty() {
//!         return Err(AppError::Validation("\"title\" is required".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use lib_auth::AuthError;
use thiserror::Error;

use crate::dto::ErrorResponse;
use crate::validation::ValidationError;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing request field (first violated rule only).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A store uniqueness constraint rejected the write.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Wrong credentials, or a missing/invalid bearer token.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying persistence fault.
    #[error("Store error: {0}")]
    Store(String),

    /// A store or hashing call exceeded its time budget.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::DuplicateKey(_) | AppError::Authentication(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For server-side errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::DuplicateKey(msg)
            | AppError::Authentication(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::Timeout(_) => "Service temporarily unavailable".to_string(),
            AppError::Store(_) | AppError::Config(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
        }
    }

    /// Variant name used as the `code` field of error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::DuplicateKey(_) => "DuplicateKey",
            AppError::Authentication(_) => "Authentication",
            AppError::NotFound(_) => "NotFound",
            AppError::Store(_) => "Store",
            AppError::Timeout(_) => "Timeout",
            AppError::Config(_) => "Config",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.user_message(),
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.message)
    }
}

/// Convert `lib_auth::AuthError` to `AppError`.
impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken => AppError::Authentication("Invalid token".to_string()),
            AuthError::InvalidSecret(msg) => AppError::Config(format!("TOKEN_SECRET {}", msg)),
            AuthError::TokenEncoding(_) | AuthError::PasswordHash(_) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::DuplicateKey(format!("Database error: {}", db_err.message()))
            }
            sqlx::Error::Database(db_err) => {
                AppError::Store(format!("Database error: {}", db_err.message()))
            }
            sqlx::Error::PoolTimedOut => AppError::Timeout("Database pool timed out".to_string()),
            _ => AppError::Store(format!("Database error: {}", err)),
        }
    }
}
