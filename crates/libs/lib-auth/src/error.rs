//! # Authentication Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Any token that fails structural, signature or expiry checks.
    ///
    /// Intentionally carries no detail about which check failed.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Failed to encode token: {0}")]
    TokenEncoding(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Signing secret is invalid: {0}")]
    InvalidSecret(String),
}
