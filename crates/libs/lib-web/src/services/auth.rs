//! # Auth Service
//!
//! Registration and login flows.
//!
//! ## Registration
//!
//! ```text
//! validate → find_by_email (fast-path duplicate check) → hash → create
//! ```
//!
//! The pre-check only saves a hash on the common duplicate case. Two
//! concurrent registrations can both pass it; the `UNIQUE(email)` constraint
//! then rejects the second insert with the same `Email already exists` error.
//!
//! ## Login
//!
//! ```text
//! validate → find_by_email → verify password → issue token
//! ```
//!
//! An unknown email yields `Invalid email` and a wrong password
//! `Invalid password`; both are 400s.
//!
//! Hashing runs on the blocking pool and every step has a time budget, so a
//! slow hash or store round-trip never stalls unrelated requests.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;
use lib_auth::{hash_password, verify_password, TokenIssuer};
use lib_core::dto::{LoginRequest, RegisterRequest};
use lib_core::model::store::models::UserForCreate;
use lib_core::model::store::user_repository::DUPLICATE_EMAIL;
use lib_core::model::store::UserRepository;
use lib_core::validation::{ValidCredentials, ValidRegistration, Validate};
use lib_core::{AppError, DbPool};
use tracing::{debug, info, instrument, warn};

use super::within;
use crate::server::AppState;

pub const INVALID_EMAIL: &str = "Invalid email";
pub const INVALID_PASSWORD: &str = "Invalid password";

/// Orchestrates registration and login.
#[derive(Clone)]
pub struct AuthService {
    pool: DbPool,
    tokens: Arc<TokenIssuer>,
    store_timeout: Duration,
    hash_timeout: Duration,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(
            state.db.clone(),
            state.tokens.clone(),
            state.config.store_timeout(),
            state.config.hash_timeout(),
        )
    }
}

impl AuthService {
    pub fn new(
        pool: DbPool,
        tokens: Arc<TokenIssuer>,
        store_timeout: Duration,
        hash_timeout: Duration,
    ) -> Self {
        Self {
            pool,
            tokens,
            store_timeout,
            hash_timeout,
        }
    }

    /// Register a new user and return its id.
    ///
    /// # Errors
    ///
    /// * `AppError::Validation` - first violated field rule
    /// * `AppError::DuplicateKey` - email already registered
    /// * `AppError::Timeout` / `AppError::Store` - store or hasher unavailable
    #[instrument(skip_all)]
    pub async fn register(&self, req: RegisterRequest) -> Result<String, AppError> {
        let ValidRegistration {
            name,
            email,
            password,
        } = req.validate()?;

        debug!("[REGISTER] Checking for existing email...");
        let existing = within(
            self.store_timeout,
            "email lookup",
            UserRepository::find_by_email(&self.pool, &email),
        )
        .await?;
        if existing.is_some() {
            warn!("[REGISTER] Email already registered");
            return Err(AppError::DuplicateKey(DUPLICATE_EMAIL.to_string()));
        }

        debug!("[REGISTER] Hashing password...");
        let password_hash = within(self.hash_timeout, "password hashing", hash_password(password)).await?;

        debug!("[REGISTER] Creating user...");
        let user = within(
            self.store_timeout,
            "user insert",
            UserRepository::create(&self.pool, UserForCreate::new(name, email, password_hash)),
        )
        .await
        .inspect_err(|e| {
            if matches!(e, AppError::DuplicateKey(_)) {
                warn!("[REGISTER] Store rejected duplicate email");
            }
        })?;

        info!("[REGISTER] User created: {}", user.id);
        Ok(user.id)
    }

    /// Check credentials and issue a bearer token.
    ///
    /// # Errors
    ///
    /// * `AppError::Validation` - first violated field rule
    /// * `AppError::Authentication` - `Invalid email` or `Invalid password`
    /// * `AppError::Timeout` / `AppError::Store` - store or hasher unavailable
    #[instrument(skip_all)]
    pub async fn login(&self, req: LoginRequest) -> Result<String, AppError> {
        let ValidCredentials { email, password } = req.validate()?;

        let user = within(
            self.store_timeout,
            "email lookup",
            UserRepository::find_by_email(&self.pool, &email),
        )
        .await?
        .ok_or_else(|| {
            warn!("[LOGIN] Unknown email");
            AppError::Authentication(INVALID_EMAIL.to_string())
        })?;

        debug!("[LOGIN] Verifying password...");
        let is_valid = within(
            self.hash_timeout,
            "password verification",
            verify_password(password, user.password_hash),
        )
        .await?;
        if !is_valid {
            warn!("[LOGIN] Invalid password for user: {}", user.id);
            return Err(AppError::Authentication(INVALID_PASSWORD.to_string()));
        }

        let token = self.tokens.issue(&user.id)?;

        info!("[LOGIN] User authenticated: {}", user.id);
        Ok(token)
    }
}
