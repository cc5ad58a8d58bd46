//! JWT claims shared by access and refresh tokens.

use serde::{Deserialize, Serialize};

use crate::entities::Role;

/// Claims included in every backend-issued token. Access and refresh tokens
/// carry the same shape and differ only in `exp`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User id, stringified (users.id)
    pub sub: String,
    pub username: String,
    pub role: Role,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
