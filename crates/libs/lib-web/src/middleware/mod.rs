//! # Middleware
//!
//! Axum middleware for authentication, request stamping, logging, and response mapping.
//!
//! ## Modules
//!
//! - **[`mw_auth`]**: Bearer token auth gate
//! - **[`mw_req_stamp`]**: Request ID stamping
//! - **[`mw_logging`]**: Request/response logging
//! - **[`mw_res_map`]**: Response mapping and standardization

// region: --- Modules
pub mod mw_auth;
pub mod mw_logging;
pub mod mw_req_stamp;
pub mod mw_res_map;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::{require_auth, AuthUser, AUTH_TOKEN_HEADER};
pub use mw_logging::log_requests;
pub use mw_req_stamp::{stamp_req, RequestStamp};
pub use mw_res_map::map_res;
// endregion: --- Re-exports
