//! SeaORM adapter for the token revocation store.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::revoked_tokens;

/// Record a token in the blacklist. On-conflict-do-nothing on the token
/// primary key makes double revocation a no-op rather than an error.
pub async fn insert_ignore<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
    expires_at: OffsetDateTime,
) -> Result<(), sea_orm::DbErr> {
    let entry = revoked_tokens::ActiveModel {
        token: Set(token.to_string()),
        expires_at: Set(expires_at),
        created_at: Set(OffsetDateTime::now_utc()),
    };

    revoked_tokens::Entity::insert(entry)
        .on_conflict(
            OnConflict::column(revoked_tokens::Column::Token)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<bool, sea_orm::DbErr> {
    Ok(revoked_tokens::Entity::find_by_id(token.to_string())
        .one(conn)
        .await?
        .is_some())
}

/// Delete every entry whose recorded expiry is before `now`. Returns the
/// number of rows removed.
pub async fn delete_expired<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = revoked_tokens::Entity::delete_many()
        .filter(revoked_tokens::Column::ExpiresAt.lt(now))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
