//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged with clients via the REST API.

pub mod auth;
pub mod post;

pub use auth::*;
pub use post::*;
