//! # Authentication Handlers
//!
//! HTTP request handlers for the registration and login endpoints.
//!
//! ```rust,ignore
//! use axum::{Router, routing::post};
//! use lib_web::handlers::auth::{register, login};
//!
//! let app = Router::new()
//!     .route("/api/user/register", post(register))
//!     .route("/api/user/login", post(login));
//! ```

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::IntoResponse,
};
use lib_core::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use lib_core::AppError;
use tracing::{info, instrument};

use super::json_body;
use crate::middleware::AUTH_TOKEN_HEADER;
use crate::services::AuthService;

/// Register handler - creates a new user account.
///
/// # Returns
///
/// * `200 {"user": "<id>"}` - User created; the password hash is never echoed
/// * `400` - Validation error or `Email already exists`
#[instrument(skip_all)]
pub async fn register(
    State(auth): State<AuthService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, AppError> {
    info!("[REGISTER] New registration request");
    let req = json_body(payload)?;

    let user = auth.register(req).await?;

    Ok(Json(RegisterResponse { user }))
}

/// Login handler - exchanges credentials for a bearer token.
///
/// # Returns
///
/// * `200 {"token": "<jwt>"}` with the same token in the `auth-token` header
/// * `400` - Validation error, `Invalid email` or `Invalid password`
#[instrument(skip_all)]
pub async fn login(
    State(auth): State<AuthService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    info!("[LOGIN] Login attempt");
    let req = json_body(payload)?;

    let token = auth.login(req).await?;

    Ok((
        [(AUTH_TOKEN_HEADER, token.clone())],
        Json(LoginResponse { token }),
    ))
}

#[cfg(test)]
mod tests;
