//! SeaORM adapter for blog posts.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::posts;

pub mod dto;

pub use dto::PostCreate;

pub async fn insert_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PostCreate,
) -> Result<posts::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let post_active = posts::ActiveModel {
        id: NotSet,
        author_id: Set(dto.author_id),
        title: Set(dto.title),
        content: Set(dto.content),
        image_urls: Set(serde_json::json!(dto.image_urls)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    post_active.insert(conn).await
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<posts::Model>, sea_orm::DbErr> {
    posts::Entity::find()
        .order_by_desc(posts::Column::CreatedAt)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Option<posts::Model>, sea_orm::DbErr> {
    posts::Entity::find_by_id(post_id).one(conn).await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = posts::Entity::delete_many()
        .filter(posts::Column::Id.eq(post_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
