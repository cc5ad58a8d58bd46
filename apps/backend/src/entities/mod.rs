pub mod posts;
pub mod revoked_tokens;
pub mod users;

pub use posts::Entity as Posts;
pub use posts::Model as Post;
pub use revoked_tokens::Entity as RevokedTokens;
pub use revoked_tokens::Model as RevokedToken;
pub use users::Entity as Users;
pub use users::Model as User;
pub use users::Role;
