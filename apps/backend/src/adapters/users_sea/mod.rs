//! SeaORM adapter for the user store.

use sea_orm::sea_query::Condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via map_db_err.

/// Single lookup matching either username or email, across all roles.
pub async fn find_by_username_or_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(
            Condition::any()
                .add(users::Column::Username.eq(identity))
                .add(users::Column::Email.eq(identity)),
        )
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

/// Plain insert. Duplicate username/email surfaces as a unique-violation
/// DbErr from the store; there is deliberately no pre-check here.
pub async fn insert_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        email: Set(dto.email),
        role: Set(dto.role),
        password_hash: Set(dto.password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}

pub async fn update_password<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: users::Model,
    new_password_hash: String,
) -> Result<users::Model, sea_orm::DbErr> {
    let mut user_active: users::ActiveModel = user.into();
    user_active.password_hash = Set(new_password_hash);
    user_active.updated_at = Set(time::OffsetDateTime::now_utc());
    user_active.update(conn).await
}
