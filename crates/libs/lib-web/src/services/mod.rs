//! # Services Layer
//!
//! Business logic that orchestrates the credential store, the password hasher
//! and the token issuer on behalf of the HTTP handlers:
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → Repository / lib-auth
//! ```
//!
//! ## Module Organization
//!
//! - [`auth`] - Registration and login flows
//! - [`posts`] - Posts behind the auth gate
//!
//! ## Error Handling
//!
//! All services return `Result<T, AppError>`. Every store and hashing call is
//! bounded by [`within`], which turns an elapsed budget into
//! [`AppError::Timeout`].

pub mod auth;
pub mod posts;

pub use auth::AuthService;
pub use posts::PostService;

use std::future::Future;
use std::time::Duration;

use lib_core::AppError;

/// Await `fut` for at most `limit`, converting its error into `AppError`.
pub async fn within<T, E, F>(limit: Duration, what: &'static str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, E>>,
    AppError: From<E>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => Err(AppError::Timeout(format!(
            "{} exceeded {}ms",
            what,
            limit.as_millis()
        ))),
    }
}
