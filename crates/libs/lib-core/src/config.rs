//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The loaded [`Config`] is handed to the server at construction time and
//! carried in its state; nothing reads the environment after startup.
//!
//! ## Variables
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `DATABASE_URL` | yes | |
//! | `TOKEN_SECRET` | yes (>= 32 bytes) | |
//! | `JWT_EXPIRATION_HOURS` | no | `24` |
//! | `STORE_TIMEOUT_MS` | no | `5000` |
//! | `HASH_TIMEOUT_MS` | no | `10000` |
//! | `BIND_ADDRESS` | no | `127.0.0.1:5000` |

use std::time::Duration;

use lib_auth::token::MIN_SECRET_LEN;
use lib_utils::{get_env, get_env_parse_or};

use crate::error::{AppError, Result};

pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_HASH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Credential and post store connection URL (e.g. `sqlite:data/auth.db`)
    pub database_url: String,

    /// Secret key for token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub token_secret: String,

    /// Token validity period in hours
    ///
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub jwt_expiration_hours: i64,

    /// Upper bound for a single store round-trip
    pub store_timeout_ms: u64,

    /// Upper bound for a single hash or verify call
    pub hash_timeout_ms: u64,

    /// Address the HTTP listener binds to
    pub bind_address: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let config_err = |e: lib_utils::envs::Error| AppError::Config(e.to_string());

        Ok(Self {
            database_url: get_env("DATABASE_URL").map_err(config_err)?,
            token_secret: get_env("TOKEN_SECRET").map_err(config_err)?,
            jwt_expiration_hours: get_env_parse_or("JWT_EXPIRATION_HOURS", DEFAULT_EXPIRATION_HOURS)
                .map_err(config_err)?,
            store_timeout_ms: get_env_parse_or("STORE_TIMEOUT_MS", DEFAULT_STORE_TIMEOUT_MS)
                .map_err(config_err)?,
            hash_timeout_ms: get_env_parse_or("HASH_TIMEOUT_MS", DEFAULT_HASH_TIMEOUT_MS)
                .map_err(config_err)?,
            bind_address: get_env("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<()> {
        if self.token_secret.len() < MIN_SECRET_LEN {
            return Err(AppError::Config(format!(
                "TOKEN_SECRET must be at least {} characters long",
                MIN_SECRET_LEN
            )));
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err(AppError::Config(
                "JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string(),
            ));
        }

        if self.store_timeout_ms == 0 || self.hash_timeout_ms == 0 {
            return Err(AppError::Config(
                "STORE_TIMEOUT_MS and HASH_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn hash_timeout(&self) -> Duration {
        Duration::from_millis(self.hash_timeout_ms)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("token_secret", &"<redacted>")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("store_timeout_ms", &self.store_timeout_ms)
            .field("hash_timeout_ms", &self.hash_timeout_ms)
            .field("bind_address", &self.bind_address)
            .finish()
    }
}
