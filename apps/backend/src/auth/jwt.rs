//! Token minting and verification.
//!
//! Everything here is pure and local: signing and expiry are checked without
//! any store lookup. A token that passes verification here has proven
//! well-formedness only; callers that need "currently valid for
//! authorization" must additionally consult the revocation store
//! (`services::tokens::is_revoked`).

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::Claims;
use crate::entities::Role;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

fn mint_token(
    sub: &str,
    username: &str,
    role: Role,
    now: SystemTime,
    ttl: Duration,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        username: username.to_string(),
        role,
        iat,
        exp: iat + ttl.as_secs() as i64,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Mint a HS256 access token with `exp = now + access_ttl`. Stateless.
pub fn mint_access_token(
    sub: &str,
    username: &str,
    role: Role,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    mint_token(sub, username, role, now, security.access_ttl, security)
}

/// Mint a HS256 refresh token with `exp = now + refresh_ttl`. Stateless.
pub fn mint_refresh_token(
    sub: &str,
    username: &str,
    role: Role,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    mint_token(sub, username, role, now, security.refresh_ttl, security)
}

/// Verify signature and expiry, returning the embedded claims.
///
/// Errors:
/// - Expired token → `AppError::expired_token()`
/// - Bad signature or otherwise malformed → `AppError::invalid_token()`
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    // Default Validation already checks exp; pin algorithm to configured algorithm.
    let validation = Validation::new(security.algorithm);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::expired_token(),
        _ => AppError::invalid_token(),
    })
}

/// Verify an access token presented as a session credential.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    verify_token(token, security)
}

/// Verify a refresh token. On success the caller reads `claims.sub` to find
/// the user a new access token should be bound to.
pub fn verify_refresh_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    verify_token(token, security)
}

/// Decode a token while ignoring expiry. Used by revocation: an expired
/// token can still be blacklisted, but one that fails the signature check
/// cannot be decoded at all and is rejected with `invalid_token`.
pub fn decode_for_revocation(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::invalid_token())
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{
        decode_for_revocation, mint_access_token, mint_refresh_token, verify_access_token,
        verify_refresh_token,
    };
    use crate::entities::Role;
    use crate::error::AppError;
    use crate::errors::ErrorCode;
    use crate::state::security_config::SecurityConfig;

    fn test_security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    fn unauthorized_code(err: AppError) -> ErrorCode {
        match err {
            AppError::Unauthorized { code, .. } => code,
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let security = test_security();
        let now = SystemTime::now();

        let token = mint_access_token("42", "alice", Role::Developer, now, &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Developer);
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(claims.exp, claims.iat + 24 * 60 * 60);
    }

    #[test]
    fn test_refresh_token_has_longer_ttl() {
        let security = test_security();
        let now = SystemTime::now();

        let token = mint_refresh_token("42", "alice", Role::Company, now, &security).unwrap();
        let claims = verify_refresh_token(&token, &security).unwrap();

        assert_eq!(claims.exp, claims.iat + 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token() {
        let security = test_security().with_access_ttl(Duration::from_secs(60));
        // Far enough in the past that a 60s token is expired even with the
        // verifier's default leeway
        let now = SystemTime::now() - Duration::from_secs(4 * 60);

        let token = mint_access_token("7", "bob", Role::Developer, now, &security).unwrap();
        let err = verify_access_token(&token, &security).unwrap_err();

        assert_eq!(unauthorized_code(err), ErrorCode::ExpiredToken);
    }

    #[test]
    fn test_bad_signature() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let token =
            mint_access_token("7", "bob", Role::Developer, SystemTime::now(), &security_a).unwrap();

        let security_b = SecurityConfig::new("secret-B".as_bytes());
        let err = verify_access_token(&token, &security_b).unwrap_err();

        assert_eq!(unauthorized_code(err), ErrorCode::InvalidToken);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let err = verify_access_token("not.a.jwt", &test_security()).unwrap_err();
        assert_eq!(unauthorized_code(err), ErrorCode::InvalidToken);
    }

    #[test]
    fn test_decode_for_revocation_accepts_expired() {
        let security = test_security().with_access_ttl(Duration::from_secs(60));
        let now = SystemTime::now() - Duration::from_secs(10 * 60);

        let token = mint_access_token("7", "bob", Role::Developer, now, &security).unwrap();

        // Ordinary verification rejects it, revocation decoding does not.
        assert!(verify_access_token(&token, &security).is_err());
        let claims = decode_for_revocation(&token, &security).unwrap();
        assert_eq!(claims.sub, "7");
        assert!(claims.exp < SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() as i64);
    }

    #[test]
    fn test_decode_for_revocation_rejects_bad_signature() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let token =
            mint_access_token("7", "bob", Role::Developer, SystemTime::now(), &security_a).unwrap();

        let security_b = SecurityConfig::new("secret-B".as_bytes());
        let err = decode_for_revocation(&token, &security_b).unwrap_err();
        assert_eq!(unauthorized_code(err), ErrorCode::InvalidToken);
    }
}
