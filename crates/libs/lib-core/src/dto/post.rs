//! # Post Data Transfer Objects
//!
//! Request and response structures for the token-gated `/api/posts` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::store::models::Post;

/// Create-post request (`POST /api/posts`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
}

/// Update-post request (`PATCH /api/posts/{id}`). Only the title is mutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<Value>,
}

/// Public view of a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub author_id: String,
    pub created_at: String,
}

impl From<Post> for PostInfo {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            author_id: post.author_id,
            created_at: lib_utils::format_time(post.created_at),
        }
    }
}

/// Listing response (`GET /api/posts`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostsResponse {
    pub posts: Vec<PostInfo>,
}

/// Delete response (`DELETE /api/posts/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub deleted: u64,
}
