//! # User Repository
//!
//! Credential store: database access layer for user records.
//!
//! Users are only ever created here; this core never updates or deletes them.
//! Email uniqueness is enforced by the `UNIQUE` constraint on `users.email`,
//! so two concurrent inserts for the same address resolve to one row and one
//! [`AppError::DuplicateKey`].
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_memory_pool, UserRepository};
//! # use lib_core::model::store::models::UserForCreate;
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_memory_pool().await?;
//!
//! let user = UserRepository::create(
//!     &pool,
//!     UserForCreate::new("Ann".into(), "ann@x.com".into(), "$argon2id$...".into()),
//! )
//! .await?;
//!
//! let found = UserRepository::find_by_email(&pool, "ann@x.com").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use sqlx::query_as;
use uuid::Uuid;

use super::models::{User, UserForCreate};
use super::DbPool;
use crate::error::{AppError, Result};

/// Message used for every duplicate-email rejection.
pub const DUPLICATE_EMAIL: &str = "Email already exists";

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by their email address.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found with matching email
    /// * `Ok(None)` - No user found with that email
    /// * `Err(AppError::Store)` - Database error occurred
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>> {
        let user = query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<User>> {
        let user = query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Create a new user with a freshly assigned id.
    ///
    /// # Errors
    ///
    /// * `AppError::DuplicateKey` - the email is already registered
    /// * `AppError::Store` - any other database failure
    pub async fn create(pool: &DbPool, user_data: UserForCreate) -> Result<User> {
        let id = Uuid::new_v4().to_string();
        let created_at = lib_utils::now_utc();

        query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(&id)
        .bind(&user_data.name)
        .bind(&user_data.email)
        .bind(&user_data.password_hash)
        .bind(created_at)
        .fetch_one(pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::DuplicateKey(_) => AppError::DuplicateKey(DUPLICATE_EMAIL.to_string()),
            other => other,
        })
    }

    /// Count all users.
    pub async fn count(pool: &DbPool) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
