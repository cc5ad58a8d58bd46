//! Blog post flows. Plain CRUD; image URLs arrive as strings, the upload
//! pipeline that produces them lives outside this service.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::adapters::posts_sea::PostCreate;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::posts;
use crate::repos::posts::Post;

pub async fn create_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author_id: i64,
    title: &str,
    content: &str,
    image_urls: Vec<String>,
) -> Result<Post, AppError> {
    if title.trim().is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "title must not be empty".to_string(),
        ));
    }

    let post = posts::create_post(
        conn,
        PostCreate {
            author_id,
            title: title.to_string(),
            content: content.to_string(),
            image_urls,
        },
    )
    .await?;

    info!(post_id = post.id, author_id, "post created");
    Ok(post)
}

pub async fn list_posts<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Post>, AppError> {
    Ok(posts::list_posts(conn).await?)
}

pub async fn get_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Post, AppError> {
    posts::find_by_id(conn, post_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::PostNotFound, format!("Post {post_id} not found")))
}

/// Delete a post; only its author may do so.
pub async fn delete_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
    requester_id: i64,
) -> Result<(), AppError> {
    let post = get_post(conn, post_id).await?;
    if post.author_id != requester_id {
        return Err(AppError::forbidden());
    }

    posts::delete_by_id(conn, post_id).await?;
    info!(post_id, "post deleted");
    Ok(())
}
