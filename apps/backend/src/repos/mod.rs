pub mod posts;
pub mod revoked_tokens;
pub mod users;
