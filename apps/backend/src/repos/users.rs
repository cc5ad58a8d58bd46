//! User repository functions for the domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::adapters::users_sea::UserCreate;
use crate::entities::Role;
use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn find_by_username_or_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_username_or_email(conn, identity).await?;
    Ok(user.map(User::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<User, DomainError> {
    let user = users_adapter::insert_user(conn, dto).await?;
    Ok(User::from(user))
}

pub async fn update_password<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    new_password_hash: String,
) -> Result<User, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(crate::errors::domain::NotFoundKind::User, "User not found")
        })?;
    let updated = users_adapter::update_password(conn, user, new_password_hash).await?;
    Ok(User::from(updated))
}

// Conversion between the SeaORM model and the domain model

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            role: model.role,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
