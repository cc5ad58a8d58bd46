use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{mint_access_token, verify_refresh_token};
use crate::entities::Role;
use crate::error::AppError;
use crate::extractors::auth_token::AuthToken;
use crate::extractors::current_user::CurrentUser;
use crate::repos::users;
use crate::services::tokens;
use crate::services::users as users_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

/// Create a new account. Role must be `company` or `developer`; username and
/// email uniqueness is enforced by the store, so a duplicate comes back as a
/// 409 regardless of interleaving.
async fn register(
    req: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = users_service::register(
        &app_state.db,
        &req.username,
        &req.email,
        &req.password,
        &req.role,
    )
    .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id: user.id,
    }))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username or email; both are accepted.
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub role: Role,
    pub username: String,
}

/// Exchange credentials for an access+refresh token pair.
async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = users_service::authenticate(&app_state.db, &req.username, &req.password).await?;

    let pair = tokens::issue_pair(&user, SystemTime::now(), &app_state.security)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: "bearer".to_string(),
        role: user.role,
        username: user.username,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
    pub role: Role,
    pub username: String,
}

/// Trade a refresh token plus the current access token for a fresh access
/// token. The old access token is revoked; the refresh token stays usable
/// until it expires or is revoked by logout.
async fn refresh(
    auth: AuthToken,
    req: web::Json<RefreshRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let claims = verify_refresh_token(&req.refresh_token, &app_state.security)?;

    if tokens::is_revoked(&app_state.db, &req.refresh_token).await? {
        return Err(AppError::unauthorized());
    }

    let user_id: i64 = claims.sub.parse().map_err(|_| AppError::invalid_token())?;
    let user = users::find_by_id(&app_state.db, user_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(AppError::unauthorized)?;

    tokens::revoke(&app_state.db, &auth.token, &app_state.security).await?;
    tokens::spawn_prune(app_state.db.clone());

    let access_token = mint_access_token(
        &claims.sub,
        &user.username,
        user.role,
        SystemTime::now(),
        &app_state.security,
    )?;

    Ok(HttpResponse::Ok().json(RefreshResponse {
        access_token,
        token_type: "bearer".to_string(),
        role: user.role,
        username: user.username,
    }))
}

#[derive(Debug, Deserialize)]
pub struct LogoutQuery {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub status: String,
    pub message: String,
}

/// Revoke both tokens of a session. Revoking an already-revoked or expired
/// token succeeds, so repeating a logout is harmless.
async fn logout(
    auth: AuthToken,
    query: web::Query<LogoutQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    tokens::revoke(&app_state.db, &query.refresh_token, &app_state.security).await?;
    tokens::revoke(&app_state.db, &auth.token, &app_state.security).await?;
    tokens::spawn_prune(app_state.db.clone());

    Ok(HttpResponse::Ok().json(LogoutResponse {
        status: "success".to_string(),
        message: "Logged out successfully".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordResponse {
    pub message: String,
}

/// Replace the caller's password. Tokens issued before the reset stay valid.
async fn reset_password(
    current_user: CurrentUser,
    req: web::Json<ResetPasswordRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    users_service::reset_password(
        &app_state.db,
        current_user.id,
        &req.current_password,
        &req.new_password,
    )
    .await?;

    Ok(HttpResponse::Ok().json(ResetPasswordResponse {
        message: "Password has been reset successfully".to_string(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/token", web::post().to(login))
        .route("/refresh-token", web::post().to(refresh))
        .route("/logout", web::get().to(logout))
        .route("/reset-password", web::post().to(reset_password));
}
