use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User entity representing a complete credential record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Data structure for creating a new user.
///
/// Password must be hashed before creating.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl UserForCreate {
    /// Create a new `UserForCreate` instance.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            name,
            email,
            password_hash,
        }
    }
}

/// Post entity.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

/// Data structure for creating a new post.
#[derive(Debug, Clone)]
pub struct PostForCreate {
    pub title: String,
    pub description: String,
    pub author_id: String,
}
