//! # Authentication Middleware
//!
//! Auth gate for protected routes.
//!
//! Reads the bearer token from the `auth-token` header, verifies it with the
//! shared [`TokenIssuer`], and injects the caller's identity into the request
//! extensions. Each request ends in exactly one of two states:
//!
//! - **Authenticated**: [`AuthUser`] is in the extensions and the handler runs.
//! - **Rejected**: `400` with `Access denied, no token provided` (header
//!   missing) or `Invalid token` (verification failed). No retries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware, routing::get, Router};
//! use lib_web::middleware::mw_auth::require_auth;
//!
//! let app = Router::new()
//!     .route("/api/posts", get(list_posts))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! Handlers can then extract the identity using `Extension<AuthUser>`:
//!
//! ```rust,ignore
//! use axum::extract::Extension;
//! use lib_web::middleware::AuthUser;
//!
//! async fn protected_handler(Extension(user): Extension<AuthUser>) -> String {
//!     format!("Hello, user {}!", user.id)
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderName,
    middleware::Next,
    response::Response,
};
use lib_auth::{Claims, TokenIssuer};
use lib_core::AppError;
use tracing::{debug, warn};

/// Header carrying the bearer token, on requests and on the login response.
pub const AUTH_TOKEN_HEADER: HeaderName = HeaderName::from_static("auth-token");

pub const NO_TOKEN_MESSAGE: &str = "Access denied, no token provided";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Identity of an authenticated caller.
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// User id the token was issued for
    pub id: String,
    /// Full verified claims
    pub claims: Claims,
}

/// Auth gate middleware.
///
/// A header that is present but not valid visible ASCII is treated the same
/// as a missing one.
pub async fn require_auth(
    State(tokens): State<Arc<TokenIssuer>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(&AUTH_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            warn!("[AUTH] Missing auth-token header");
            AppError::Authentication(NO_TOKEN_MESSAGE.to_string())
        })?;

    let claims = tokens.verify_claims(token).map_err(|_| {
        warn!("[AUTH] Token verification failed");
        AppError::Authentication(INVALID_TOKEN_MESSAGE.to_string())
    })?;

    debug!("[AUTH] Authenticated user: {}", claims.sub);

    req.extensions_mut().insert(AuthUser {
        id: claims.sub.clone(),
        claims,
    });

    Ok(next.run(req).await)
}
