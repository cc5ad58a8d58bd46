//! Token lifecycle service: issuance pairs, revocation, and pruning.
//!
//! Minting and verification themselves are pure (`auth::jwt`); this module
//! owns the stateful half of the contract, the revocation store.

use std::time::SystemTime;

use sea_orm::{ConnectionTrait, DatabaseConnection};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::auth::jwt::{decode_for_revocation, mint_access_token, mint_refresh_token};
use crate::error::AppError;
use crate::repos::revoked_tokens;
use crate::repos::users::User;
use crate::state::security_config::SecurityConfig;

/// A freshly issued access/refresh pair bound to one user.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Mint an access+refresh pair for the given user. Stateless.
pub fn issue_pair(
    user: &User,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<TokenPair, AppError> {
    let sub = user.id.to_string();
    let access_token = mint_access_token(&sub, &user.username, user.role, now, security)?;
    let refresh_token = mint_refresh_token(&sub, &user.username, user.role, now, security)?;
    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Blacklist a token. The token must still decode under our key (expiry is
/// not enforced, so an already-expired token can be blacklisted), and its own
/// exp claim becomes the entry's pruning horizon. Revoking a token twice is
/// not an error.
pub async fn revoke<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
    security: &SecurityConfig,
) -> Result<(), AppError> {
    let claims = decode_for_revocation(token, security)?;
    let expires_at = OffsetDateTime::from_unix_timestamp(claims.exp)
        .map_err(|e| AppError::internal(format!("token exp out of range: {e}")))?;

    revoked_tokens::put(conn, token, expires_at).await?;
    debug!(sub = %claims.sub, "token revoked");
    Ok(())
}

/// Existence check against the revocation store.
pub async fn is_revoked<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    token: &str,
) -> Result<bool, AppError> {
    Ok(revoked_tokens::exists(conn, token).await?)
}

/// Delete revocation entries whose expiry has passed. Returns how many rows
/// were removed.
pub async fn prune_expired<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, AppError> {
    let removed = revoked_tokens::delete_expired(conn, OffsetDateTime::now_utc()).await?;
    if removed > 0 {
        debug!(removed, "pruned expired revocation entries");
    }
    Ok(removed)
}

/// Fire-and-forget prune, piggybacked on logout/refresh. Pruning is
/// best-effort maintenance: a failure is logged and never fails the caller.
pub fn spawn_prune(db: DatabaseConnection) {
    tokio::spawn(async move {
        if let Err(e) = prune_expired(&db).await {
            warn!("revocation prune failed: {e}");
        }
    });
}
