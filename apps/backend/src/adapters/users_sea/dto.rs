//! Write-side DTOs for the users adapter.

use crate::entities::Role;

/// Fields needed to insert a new user row. The password arrives already
/// hashed; this layer never sees plaintext.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}
