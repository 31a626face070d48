//! # Authentication Library
//!
//! Password hashing and bearer token issuance/verification.

pub mod error;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use error::{AuthError, Result};
pub use pwd::{hash_password, hash_password_blocking, verify_password, verify_password_blocking};
pub use token::{Claims, TokenIssuer};
