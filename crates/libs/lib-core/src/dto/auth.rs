//! # Authentication Data Transfer Objects
//!
//! Request and response structures for the registration and login endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/user/register` - [`RegisterRequest`] -> [`RegisterResponse`]
//! - `POST /api/user/login` - [`LoginRequest`] -> [`LoginResponse`]
//!
//! ## Wire Format
//!
//! Request fields are kept as raw, optional JSON values. A missing field or a
//! field of the wrong type is then reported by validation in the fixed field
//! order (`"name" is required` wins over a numeric password) instead of by
//! the deserializer in document order.
//!
//! ### Login Flow
//!
//! ```text
//! POST /api/user/login
//! Content-Type: application/json
//!
//! {
//!   "email": "ann@x.com",
//!   "password": "secret1"
//! }
//! ```
//!
//! Response (the token is also sent in the `auth-token` header):
//! ```text
//! {
//!   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Registration request.
///
/// # Validation Rules (Server-Side)
///
/// Checked in order, first failure wins:
/// - `name`: required, 2-255 characters
/// - `email`: required, 6-255 characters, valid email
/// - `password`: required, 6-255 characters
///
/// # Security Note
///
/// The password is hashed with Argon2 before storage and never echoed back.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

/// Registration response carrying only the new user's id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    pub user: String,
}

/// Login request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub password: Option<Value>,
}

/// Login response.
///
/// The `token` should be sent in subsequent requests as:
/// ```text
/// auth-token: <token>
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
}

/// Standard error body for every failed request.
///
/// ```json
/// { "error": "Email already exists", "code": "DuplicateKey" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
