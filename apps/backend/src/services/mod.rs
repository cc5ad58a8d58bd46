pub mod posts;
pub mod tokens;
pub mod users;
