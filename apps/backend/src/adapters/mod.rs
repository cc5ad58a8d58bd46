pub mod posts_sea;
pub mod revoked_tokens_sea;
pub mod users_sea;
