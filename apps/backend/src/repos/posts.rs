//! Post repository functions for the domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::posts_sea as posts_adapter;
use crate::adapters::posts_sea::PostCreate;
use crate::errors::domain::DomainError;

/// Post domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub image_urls: Vec<String>,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn create_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PostCreate,
) -> Result<Post, DomainError> {
    let post = posts_adapter::insert_post(conn, dto).await?;
    Ok(Post::from(post))
}

pub async fn list_posts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Post>, DomainError> {
    let posts = posts_adapter::find_all(conn).await?;
    Ok(posts.into_iter().map(Post::from).collect())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Option<Post>, DomainError> {
    let post = posts_adapter::find_by_id(conn, post_id).await?;
    Ok(post.map(Post::from))
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<u64, DomainError> {
    Ok(posts_adapter::delete_by_id(conn, post_id).await?)
}

impl From<crate::entities::posts::Model> for Post {
    fn from(model: crate::entities::posts::Model) -> Self {
        // image_urls is stored as a JSON array of strings; anything else in
        // the column is treated as empty rather than failing the read.
        let image_urls = model
            .image_urls
            .as_array()
            .map(|urls| {
                urls.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: model.id,
            author_id: model.author_id,
            title: model.title,
            content: model.content,
            image_urls,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
