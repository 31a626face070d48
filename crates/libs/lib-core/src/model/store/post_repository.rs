//! # Post Repository
//!
//! Database access layer for posts served behind the auth gate.

use sqlx::query_as;
use uuid::Uuid;

use super::models::{Post, PostForCreate};
use super::DbPool;
use crate::error::Result;

const POST_COLUMNS: &str = "id, title, description, author_id, created_at";

/// Post repository for database operations.
pub struct PostRepository;

impl PostRepository {
    /// List all posts, newest first.
    pub async fn list(pool: &DbPool) -> Result<Vec<Post>> {
        let posts = query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY rowid DESC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }

    /// Insert a post and return it.
    pub async fn create(pool: &DbPool, post_data: PostForCreate) -> Result<Post> {
        let post = query_as::<_, Post>(&format!(
            "INSERT INTO posts ({POST_COLUMNS}) VALUES (?, ?, ?, ?, ?) RETURNING {POST_COLUMNS}"
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&post_data.title)
        .bind(&post_data.description)
        .bind(&post_data.author_id)
        .bind(lib_utils::now_utc())
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Post>> {
        let post = query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(post)
    }

    /// Replace the title of a post. Returns `None` when no post has this id.
    pub async fn update_title(pool: &DbPool, id: &str, title: &str) -> Result<Option<Post>> {
        let post = query_as::<_, Post>(&format!(
            "UPDATE posts SET title = ? WHERE id = ? RETURNING {POST_COLUMNS}"
        ))
        .bind(title)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(post)
    }

    /// Delete a post, returning the number of removed rows (0 or 1).
    pub async fn delete(pool: &DbPool, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::models::UserForCreate;
    use crate::model::store::{create_memory_pool, UserRepository};
    use crate::AppError;

    async fn setup_with_author() -> (DbPool, String) {
        let pool = create_memory_pool()
            .await
            .expect("Failed to create test database");
        let author = UserRepository::create(
            &pool,
            UserForCreate::new("Ann".into(), "ann@x.com".into(), "hash".into()),
        )
        .await
        .expect("Author creation should succeed");

        (pool, author.id)
    }

    fn new_post(title: &str, author_id: &str) -> PostForCreate {
        PostForCreate {
            title: title.to_string(),
            description: "Private data! Do not share!".to_string(),
            author_id: author_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (pool, author_id) = setup_with_author().await;

        let post = PostRepository::create(&pool, new_post("1st Post", &author_id))
            .await
            .unwrap();
        let found = PostRepository::find_by_id(&pool, &post.id)
            .await
            .unwrap()
            .expect("Post should exist after creation");

        assert_eq!(found.title, "1st Post");
        assert_eq!(found.author_id, author_id);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let (pool, author_id) = setup_with_author().await;

        for title in ["first", "second", "third"] {
            PostRepository::create(&pool, new_post(title, &author_id))
                .await
                .unwrap();
        }

        let titles: Vec<String> = PostRepository::list(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_update_title() {
        let (pool, author_id) = setup_with_author().await;
        let post = PostRepository::create(&pool, new_post("old", &author_id))
            .await
            .unwrap();

        let updated = PostRepository::update_title(&pool, &post.id, "new")
            .await
            .unwrap()
            .expect("Existing post should be updated");

        assert_eq!(updated.title, "new");
        assert_eq!(updated.description, post.description);

        let missing = PostRepository::update_title(&pool, "missing", "new").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let (pool, author_id) = setup_with_author().await;
        let post = PostRepository::create(&pool, new_post("doomed", &author_id))
            .await
            .unwrap();

        assert_eq!(PostRepository::delete(&pool, &post.id).await.unwrap(), 1);
        assert_eq!(PostRepository::delete(&pool, &post.id).await.unwrap(), 0);
        assert!(PostRepository::find_by_id(&pool, &post.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_author_rejected() {
        let (pool, _) = setup_with_author().await;

        let result = PostRepository::create(&pool, new_post("orphan", "no-such-user")).await;

        assert!(matches!(result, Err(AppError::Store(_))));
    }
}
