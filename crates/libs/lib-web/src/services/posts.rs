//! # Post Service
//!
//! Posts collection served to authenticated callers.

use std::time::Duration;

use axum::extract::FromRef;
use lib_core::dto::{CreatePostRequest, PostInfo, UpdatePostRequest};
use lib_core::model::store::models::PostForCreate;
use lib_core::model::store::{PostRepository, UserRepository};
use lib_core::validation::{ValidPost, Validate};
use lib_core::{AppError, DbPool};
use tracing::{debug, info, warn};

use super::within;
use crate::middleware::mw_auth::INVALID_TOKEN_MESSAGE;
use crate::server::AppState;

pub const POST_NOT_FOUND: &str = "Post not found";

#[derive(Clone)]
pub struct PostService {
    pool: DbPool,
    store_timeout: Duration,
}

impl FromRef<AppState> for PostService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.db.clone(), state.config.store_timeout())
    }
}

impl PostService {
    pub fn new(pool: DbPool, store_timeout: Duration) -> Self {
        Self {
            pool,
            store_timeout,
        }
    }

    pub async fn list(&self) -> Result<Vec<PostInfo>, AppError> {
        let posts = within(self.store_timeout, "post listing", PostRepository::list(&self.pool)).await?;
        debug!("[POSTS] Listed {} posts", posts.len());

        Ok(posts.into_iter().map(PostInfo::from).collect())
    }

    /// Create a post authored by `author_id`.
    ///
    /// The gate only proves the token was signed with our secret. A token for
    /// a user this store does not know is rejected as `Invalid token`.
    pub async fn create(&self, author_id: &str, req: CreatePostRequest) -> Result<PostInfo, AppError> {
        let ValidPost { title, description } = req.validate()?;

        let author = within(
            self.store_timeout,
            "author lookup",
            UserRepository::find_by_id(&self.pool, author_id),
        )
        .await?;
        if author.is_none() {
            warn!("[POSTS] Token subject {} has no user record", author_id);
            return Err(AppError::Authentication(INVALID_TOKEN_MESSAGE.to_string()));
        }

        let post = within(
            self.store_timeout,
            "post insert",
            PostRepository::create(
                &self.pool,
                PostForCreate {
                    title,
                    description,
                    author_id: author_id.to_string(),
                },
            ),
        )
        .await?;

        info!("[POSTS] Post {} created by {}", post.id, author_id);
        Ok(post.into())
    }

    pub async fn get(&self, id: &str) -> Result<PostInfo, AppError> {
        within(self.store_timeout, "post lookup", PostRepository::find_by_id(&self.pool, id))
            .await?
            .map(PostInfo::from)
            .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))
    }

    pub async fn update_title(&self, id: &str, req: UpdatePostRequest) -> Result<PostInfo, AppError> {
        let title = req.validate()?;

        within(
            self.store_timeout,
            "post update",
            PostRepository::update_title(&self.pool, id, &title),
        )
        .await?
        .map(PostInfo::from)
        .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))
    }

    /// Delete a post. Returns the number of removed posts (always 1).
    pub async fn delete(&self, id: &str) -> Result<u64, AppError> {
        let deleted = within(self.store_timeout, "post delete", PostRepository::delete(&self.pool, id)).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(POST_NOT_FOUND.to_string()));
        }

        info!("[POSTS] Post {} deleted", id);
        Ok(deleted)
    }
}
