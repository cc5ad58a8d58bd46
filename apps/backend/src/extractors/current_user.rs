use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::verify_access_token;
use crate::entities::Role;
use crate::error::AppError;
use crate::extractors::auth_token::bearer_token;
use crate::repos::users;
use crate::services::tokens;
use crate::state::app_state::AppState;

/// Authenticated user for a request.
///
/// Extraction performs the full "currently valid" check the token contract
/// requires: bearer parse, signature+expiry verification, revocation lookup,
/// then a database lookup of the subject. A token that passes verification
/// but sits in the revocation store is rejected as unauthorized.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let token = bearer_token(&req)?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available".to_string()))?;

            let claims = verify_access_token(&token, &app_state.security)?;

            if tokens::is_revoked(&app_state.db, &token).await? {
                return Err(AppError::unauthorized());
            }

            let user_id: i64 = claims
                .sub
                .parse()
                .map_err(|_| AppError::invalid_token())?;

            let user = users::find_by_id(&app_state.db, user_id)
                .await
                .map_err(AppError::from)?
                .ok_or_else(AppError::forbidden_user_not_found)?;

            // sub/username/role come from the verified claims; the lookup
            // only proves the subject still exists.
            Ok(CurrentUser {
                id: user.id,
                username: claims.username,
                role: claims.role,
            })
        })
    }
}
