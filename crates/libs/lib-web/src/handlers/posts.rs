//! # Post Handlers
//!
//! All routes here sit behind the auth gate, so an [`AuthUser`] is always
//! present in the request extensions.

use axum::extract::{rejection::JsonRejection, Extension, Json, Path, State};
use lib_core::dto::{CreatePostRequest, DeleteResponse, PostInfo, PostsResponse, UpdatePostRequest};
use lib_core::AppError;
use tracing::debug;

use super::json_body;
use crate::middleware::AuthUser;
use crate::services::PostService;

pub async fn list_posts(
    State(posts): State<PostService>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PostsResponse>, AppError> {
    debug!("[POSTS] Listing posts for {}", user.id);
    Ok(Json(PostsResponse {
        posts: posts.list().await?,
    }))
}

pub async fn create_post(
    State(posts): State<PostService>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<Json<PostInfo>, AppError> {
    let req = json_body(payload)?;

    Ok(Json(posts.create(&user.id, req).await?))
}

pub async fn get_post(
    State(posts): State<PostService>,
    Path(id): Path<String>,
) -> Result<Json<PostInfo>, AppError> {
    Ok(Json(posts.get(&id).await?))
}

pub async fn update_post(
    State(posts): State<PostService>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<Json<PostInfo>, AppError> {
    let req = json_body(payload)?;

    Ok(Json(posts.update_title(&id, req).await?))
}

pub async fn delete_post(
    State(posts): State<PostService>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    Ok(Json(DeleteResponse {
        deleted: posts.delete(&id).await?,
    }))
}
