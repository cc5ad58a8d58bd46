//! Revocation store repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::revoked_tokens_sea as revoked_adapter;
use crate::errors::domain::DomainError;

/// Record a token and its expiry in the blacklist. Idempotent.
pub async fn put<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
    expires_at: OffsetDateTime,
) -> Result<(), DomainError> {
    revoked_adapter::insert_ignore(conn, token, expires_at).await?;
    Ok(())
}

pub async fn exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<bool, DomainError> {
    Ok(revoked_adapter::exists(conn, token).await?)
}

/// Delete entries whose expiry is before `now`; returns how many went away.
pub async fn delete_expired<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<u64, DomainError> {
    Ok(revoked_adapter::delete_expired(conn, now).await?)
}
