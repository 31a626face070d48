//! # HTTP Request Handlers
//!
//! Axum request handlers organized by feature domain. Handlers stay thin:
//! they extract the request, delegate to [`crate::services`], and shape the
//! response.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: Credential endpoints
//!   - `POST /api/user/register` - Create a user account
//!   - `POST /api/user/login` - Exchange credentials for a bearer token
//!
//! - **[`posts`]**: Posts behind the auth gate (`auth-token` header required)
//!   - `GET /api/posts` - List posts
//!   - `POST /api/posts` - Create a post
//!   - `GET /api/posts/{id}` - Get a post
//!   - `PATCH /api/posts/{id}` - Update a post title
//!   - `DELETE /api/posts/{id}` - Delete a post

pub mod auth;
pub mod posts;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use lib_core::AppError;
use tracing::debug;

/// Client message for a body that is not a JSON object of the expected shape.
pub const INVALID_JSON_BODY: &str = "Invalid JSON body";

/// Unwrap a JSON body, reporting malformed input as a validation error.
///
/// Field types are checked later by validation, so a rejection here means
/// broken JSON, a non-object body or a wrong content type. The extractor's
/// own text stays in the logs.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        debug!("[JSON] Body rejected: {}", rejection.body_text());
        AppError::Validation(INVALID_JSON_BODY.to_string())
    })
}
