//! # Response Mapping Middleware
//!
//! Adds common headers to outgoing responses.
//!
//! Responses that carry a bearer token (the login response) are marked
//! `Cache-Control: no-store` so intermediaries never keep a copy of the token.
//! Server errors are logged once here regardless of which layer produced them.

use axum::{
    extract::Request,
    http::{header::CACHE_CONTROL, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::error;

use super::mw_auth::AUTH_TOKEN_HEADER;

/// Response mapping middleware.
pub async fn map_res(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let mut res = next.run(req).await;

    if res.status().is_server_error() {
        error!("[RESPONSE] Server error on {}: {}", path, res.status());
    }

    if res.headers().contains_key(&AUTH_TOKEN_HEADER) {
        res.headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    res
}
