//! User account flows: registration, credential checks, password reset.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::adapters::users_sea::UserCreate;
use crate::auth::password::{hash_password, verify_password};
use crate::entities::Role;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::users;
use crate::repos::users::User;

/// Register a new account.
///
/// The role string must parse as company|developer. Uniqueness of username
/// and email is NOT checked here; the store's unique indexes decide, so two
/// racing registrations with the same identity resolve to exactly one
/// success and one `DUPLICATE_IDENTITY` failure.
pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<User, AppError> {
    let role: Role = role
        .parse()
        .map_err(|e: String| AppError::invalid_role(e))?;

    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "username, email, and password must not be empty".to_string(),
        ));
    }

    let password_hash = hash_password(password)?;

    let user = users::create_user(
        conn,
        UserCreate {
            username: username.to_string(),
            email: email.to_string(),
            role,
            password_hash,
        },
    )
    .await?;

    info!(
        user_id = user.id,
        email = %Redacted(&user.email),
        role = %user.role,
        "user registered"
    );
    Ok(user)
}

/// Check a username-or-email plus password pair.
///
/// A missing account and a wrong password collapse into the same
/// `INVALID_CREDENTIALS` failure so the response never reveals which field
/// was wrong.
pub async fn authenticate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    identity: &str,
    password: &str,
) -> Result<User, AppError> {
    let user = users::find_by_username_or_email(conn, identity)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(password, &user.password_hash)? {
        debug!(user_id = user.id, "password mismatch on login");
        return Err(AppError::invalid_credentials());
    }

    Ok(user)
}

/// Replace the stored hash after checking the current password.
///
/// Sessions issued before the reset stay valid; this matches the existing
/// contract (tokens are only invalidated by logout or refresh).
pub async fn reset_password<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    current_password: &str,
    new_password: &str,
) -> Result<(), AppError> {
    let user = users::find_by_id(conn, user_id)
        .await?
        .ok_or_else(AppError::forbidden_user_not_found)?;

    if !verify_password(current_password, &user.password_hash)? {
        return Err(AppError::incorrect_password());
    }

    if new_password.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "new password must not be empty".to_string(),
        ));
    }

    let new_hash = hash_password(new_password)?;
    users::update_password(conn, user.id, new_hash).await?;

    info!(user_id = user.id, "password reset");
    Ok(())
}
